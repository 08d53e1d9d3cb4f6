use crate::color::{Rgb, wrap_hue};
use crate::math8::clamp_unit;

/// Map a position on the 0-255 color wheel to an RGB color
///
/// The wheel runs red → green → blue → red. Every channel is scaled
/// linearly by `brightness` (clipped to `[0, 1]`).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn wheel(position: u8, brightness: f32) -> Rgb {
    let brightness = clamp_unit(brightness);
    let (r, g, b) = match position {
        0..85 => (255 - position * 3, position * 3, 0),
        85..170 => {
            let offset = position - 85;
            (0, 255 - offset * 3, offset * 3)
        }
        _ => {
            let offset = position - 170;
            (offset * 3, 0, 255 - offset * 3)
        }
    };

    let scale = |channel: u8| (f32::from(channel) * brightness) as u8;
    Rgb {
        r: scale(r),
        g: scale(g),
        b: scale(b),
    }
}

/// Convert a hue angle in degrees to a wheel position
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hue_to_wheel(hue: f32) -> u8 {
    (wrap_hue(hue) / 360.0 * 256.0) as u8
}
