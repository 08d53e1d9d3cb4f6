//! HSI color model with a white channel
//!
//! Hue is split into three 120° sectors. Inside a sector two of the RGB
//! channels share the chroma through a cosine ratio and the third one is
//! dark. Desaturation moves energy into the white channel instead of mixing
//! all three colored emitters.

use core::f32::consts::FRAC_PI_3;

use libm::{cosf, fmodf};
use serde::{Deserialize, Serialize};
use smart_leds::White;

use crate::color::Rgbw;
use crate::config::DEFAULT_COLOR;
use crate::math8::clamp_unit;

/// Width of one hue sector in radians (120°)
const SECTOR: f32 = 2.0 * FRAC_PI_3;

/// Hue/saturation/intensity color descriptor
///
/// `hue` is in degrees, `saturation` in `[0, 1]` and `intensity` is the
/// global output brightness. Intensity is applied at the output stage, not
/// by [`hsi2rgbw`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsi {
    pub hue: f32,
    pub saturation: f32,
    pub intensity: u8,
}

impl Hsi {
    /// Create a color from raw components
    pub const fn new(hue: f32, saturation: f32, intensity: u8) -> Self {
        Self {
            hue,
            saturation,
            intensity,
        }
    }

    /// Create a color from user input
    ///
    /// Hue wraps into `[0, 360)`, saturation and intensity are clipped to
    /// their ranges.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn normalized(hue: f32, saturation: f32, intensity: i32) -> Self {
        Self {
            hue: wrap_hue(hue),
            saturation: clamp_unit(saturation),
            intensity: intensity.clamp(0, 255) as u8,
        }
    }

    /// Interpolate towards `target`
    ///
    /// Hue travels along the shorter arc of the color circle, saturation and
    /// intensity move linearly.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn lerp(self, target: Self, progress: f32) -> Self {
        let progress = clamp_unit(progress);
        let hue = wrap_hue(self.hue + shortest_hue_distance(self.hue, target.hue) * progress);
        let saturation = self.saturation + (target.saturation - self.saturation) * progress;
        let source_intensity = f32::from(self.intensity);
        let intensity =
            source_intensity + (f32::from(target.intensity) - source_intensity) * progress;

        Self {
            hue,
            saturation,
            intensity: intensity as u8,
        }
    }
}

impl Default for Hsi {
    fn default() -> Self {
        DEFAULT_COLOR
    }
}

/// Wrap a hue angle into `[0, 360)`
///
/// Non-finite input maps to 0.
pub fn wrap_hue(hue: f32) -> f32 {
    if !hue.is_finite() {
        return 0.0;
    }
    let mut wrapped = fmodf(hue, 360.0);
    if wrapped < 0.0 {
        wrapped += 360.0;
    }
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Signed angular distance from `from` to `to`, in `(-180, 180]`
pub fn shortest_hue_distance(from: f32, to: f32) -> f32 {
    let delta = wrap_hue(to - from);
    if delta > 180.0 { delta - 360.0 } else { delta }
}

/// Convert HSI to an RGBW pixel
///
/// `level` is the brightness of this pixel in `[0, 1]`. Out of range
/// saturation and level are clipped, hue wraps.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hsi2rgbw(hue: f32, saturation: f32, level: f32) -> Rgbw {
    let saturation = clamp_unit(saturation);
    let level = clamp_unit(level);
    let mut angle = wrap_hue(hue).to_radians();

    let sector: u8 = if angle < SECTOR {
        0
    } else if angle < 2.0 * SECTOR {
        1
    } else {
        2
    };
    angle -= SECTOR * f32::from(sector);

    let ratio = cosf(angle) / cosf(FRAC_PI_3 - angle);
    let chroma = saturation * 255.0 * level / 3.0;
    let lead = (chroma * (1.0 + ratio)) as u8;
    let trail = (chroma * (2.0 - ratio)) as u8;
    let white = (255.0 * (1.0 - saturation) * level) as u8;

    let (r, g, b) = match sector {
        0 => (lead, trail, 0),
        1 => (0, lead, trail),
        _ => (trail, 0, lead),
    };

    Rgbw {
        r,
        g,
        b,
        a: White(white),
    }
}
