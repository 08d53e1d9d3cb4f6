use crate::color::Hsi;

/// Crossfade between two indicator colors
///
/// Progress is advanced by the caller in fractions of the fade duration, so
/// the fade takes the same wall time regardless of the tick rate.
#[derive(Debug, Clone)]
pub struct ColorTransition {
    /// Currently displayed (interpolated) color
    current: Hsi,
    /// Color at the start of the transition
    source: Hsi,
    /// Color being faded to
    target: Hsi,
    /// Completed fraction of the transition (0.0-1.0)
    progress: f32,
}

impl ColorTransition {
    /// Create an idle transition showing `initial`
    pub const fn new(initial: Hsi) -> Self {
        Self {
            current: initial,
            source: initial,
            target: initial,
            progress: 0.0,
        }
    }

    /// Get current value
    pub const fn current(&self) -> Hsi {
        self.current
    }

    /// Get the value being faded to
    pub const fn target(&self) -> Hsi {
        self.target
    }

    pub const fn progress(&self) -> f32 {
        self.progress
    }

    /// Check if a transition is in progress
    pub fn is_transitioning(&self) -> bool {
        self.source != self.target
    }

    /// Start fading to `target`
    ///
    /// The fade starts from the color shown right now, so retargeting in the
    /// middle of a transition does not jump.
    pub fn set(&mut self, target: Hsi) {
        if target == self.target {
            return;
        }
        self.source = self.current;
        self.target = target;
        self.progress = 0.0;
    }

    /// Advance the transition by `step` (fraction of the fade duration)
    ///
    /// Returns `true` if the displayed color changed.
    pub fn tick(&mut self, step: f32) -> bool {
        if !self.is_transitioning() {
            return false;
        }

        self.progress += step;
        if self.progress >= 1.0 {
            self.current = self.target;
            self.source = self.target;
            self.progress = 0.0;
        } else {
            self.current = self.source.lerp(self.target, self.progress);
        }
        true
    }
}
