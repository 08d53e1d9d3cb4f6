use embassy_time::Duration;
use log::debug;

use crate::bounds::{SegmentLayout, segment_pixels};
use crate::color::{Hsi, Pixel};
use crate::config::{DEFAULT_COLOR, FADE_DURATION, PIXELS_PER_SEGMENT};
use crate::math8::progress;
use crate::transition::ColorTransition;

/// Configuration for the fade engine
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Duration of a full fade (brightness 0 → 1, or one color change)
    pub fade_duration: Duration,
    /// Segment to pixel mapping
    pub layout: SegmentLayout,
    /// Indicator color at startup
    pub color: Hsi,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fade_duration: FADE_DURATION,
            layout: SegmentLayout::new(PIXELS_PER_SEGMENT),
            color: DEFAULT_COLOR,
        }
    }
}

/// Fade Engine - crossfades the indicator segments
///
/// Holds the per-segment brightness, the color transition and the frame
/// buffer. `LEDS` is the strip length, `SEGMENTS` the number of indicators.
pub struct FadeEngine<P: Pixel, const LEDS: usize, const SEGMENTS: usize> {
    // Configuration
    fade_duration: Duration,
    layout: SegmentLayout,

    // Indicator state
    active: Option<usize>,
    levels: [f32; SEGMENTS],
    color: ColorTransition,

    // Output
    frame: [P; LEDS],
    dirty: bool,
}

impl<P: Pixel, const LEDS: usize, const SEGMENTS: usize> FadeEngine<P, LEDS, SEGMENTS> {
    /// Create an engine with every segment dark
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            fade_duration: config.fade_duration,
            layout: config.layout,
            active: None,
            levels: [0.0; SEGMENTS],
            color: ColorTransition::new(config.color),
            frame: [P::default(); LEDS],
            dirty: false,
        }
    }

    /// Select the segment that fades up, `None` fades everything out
    ///
    /// An index without a segment behind it is accepted and renders like
    /// `None`.
    pub fn set_active(&mut self, segment: Option<usize>) {
        debug!("engine: active segment {:?} -> {:?}", self.active, segment);
        self.active = segment;
    }

    pub const fn active(&self) -> Option<usize> {
        self.active
    }

    /// Start a color transition towards `color`
    pub fn set_color(&mut self, color: Hsi) {
        debug!(
            "engine: color target h={} s={} i={}",
            color.hue, color.saturation, color.intensity
        );
        self.color.set(color);
    }

    /// Color the engine is converging to
    pub const fn target_color(&self) -> Hsi {
        self.color.target()
    }

    /// Color shown right now
    pub const fn current_color(&self) -> Hsi {
        self.color.current()
    }

    pub const fn color_transition(&self) -> &ColorTransition {
        &self.color
    }

    /// Brightness of one segment (0.0-1.0)
    pub fn level(&self, segment: usize) -> Option<f32> {
        self.levels.get(segment).copied()
    }

    pub const fn levels(&self) -> &[f32; SEGMENTS] {
        &self.levels
    }

    /// Rendered frame, before the global intensity is applied
    pub const fn frame(&self) -> &[P; LEDS] {
        &self.frame
    }

    /// Global intensity for the output stage
    pub const fn brightness(&self) -> u8 {
        self.color.current().intensity
    }

    /// Whether the last [`advance`](Self::advance) changed the frame
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Advance the fades by `elapsed`
    ///
    /// Returns `true` if anything changed and the frame was re-rendered, so
    /// the caller knows the strip needs a write.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        let step = progress(elapsed, self.fade_duration);

        let mut changed = self.color.tick(step);
        let active = self.active;
        for (segment, level) in self.levels.iter_mut().enumerate() {
            if active == Some(segment) {
                if *level < 1.0 {
                    *level = (*level + step).min(1.0);
                    changed = true;
                }
            } else if *level > 0.0 {
                *level = (*level - step).max(0.0);
                changed = true;
            }
        }

        if changed {
            self.render();
        }
        self.dirty = changed;
        changed
    }

    /// Recompute every segment from the current color and its level
    fn render(&mut self) {
        let color = self.color.current();
        for (segment, level) in self.levels.iter().enumerate() {
            let pixel = P::from_hsi(color.hue, color.saturation, *level);
            segment_pixels(&mut self.frame, self.layout, segment).fill(pixel);
        }
    }
}
