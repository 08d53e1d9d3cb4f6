//! Output stage
//!
//! The engine renders colors at full intensity; the global intensity is
//! applied to a copy of the frame right before it is sent to the strip.

use crate::color::Pixel;

/// Apply the global brightness to a frame
pub fn apply_brightness<P: Pixel>(frame: &mut [P], brightness: u8) {
    if brightness == 255 {
        return;
    }

    if brightness == 0 {
        frame.fill(P::default());
        return;
    }

    for pixel in frame.iter_mut() {
        *pixel = pixel.scale(brightness);
    }
}
