mod hsi;
mod wheel;

pub use hsi::{Hsi, hsi2rgbw, shortest_hue_distance, wrap_hue};
pub use wheel::{hue_to_wheel, wheel};
use smart_leds::{RGB8, RGBW};

use crate::math8::scale8;

pub type Rgb = RGB8;
pub type Rgbw = RGBW<u8>;

/// A pixel format the fade engine can render into
///
/// Implemented for RGBW strips (HSI conversion with a white channel) and
/// plain RGB strips (hue wheel, saturation unused).
pub trait Pixel: Copy + Default + PartialEq + core::fmt::Debug {
    /// Render a color at the given pixel brightness level (0.0-1.0)
    fn from_hsi(hue: f32, saturation: f32, level: f32) -> Self;

    /// Apply the output stage brightness multiplier
    #[must_use]
    fn scale(self, brightness: u8) -> Self;

    /// Packed NeoPixel word (`0xWWRRGGBB`)
    fn packed(self) -> u32;
}

impl Pixel for Rgbw {
    fn from_hsi(hue: f32, saturation: f32, level: f32) -> Self {
        hsi2rgbw(hue, saturation, level)
    }

    fn scale(mut self, brightness: u8) -> Self {
        self.r = scale8(self.r, brightness);
        self.g = scale8(self.g, brightness);
        self.b = scale8(self.b, brightness);
        self.a.0 = scale8(self.a.0, brightness);
        self
    }

    fn packed(self) -> u32 {
        u32::from_be_bytes([self.a.0, self.r, self.g, self.b])
    }
}

impl Pixel for Rgb {
    fn from_hsi(hue: f32, _saturation: f32, level: f32) -> Self {
        wheel(hue_to_wheel(hue), level)
    }

    fn scale(mut self, brightness: u8) -> Self {
        self.r = scale8(self.r, brightness);
        self.g = scale8(self.g, brightness);
        self.b = scale8(self.b, brightness);
        self
    }

    fn packed(self) -> u32 {
        u32::from_be_bytes([0, self.r, self.g, self.b])
    }
}
