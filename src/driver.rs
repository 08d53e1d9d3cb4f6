//! `smart-leds` output adapter.

use log::warn;
use smart_leds::SmartLedsWrite;

use crate::OutputDriver;
use crate::color::Pixel;

/// Wraps any [`SmartLedsWrite`] driver as an [`OutputDriver`]
///
/// Write errors are logged and the frame is dropped; the next dirty tick
/// sends a fresh one.
pub struct SmartLedsOutput<W> {
    writer: W,
}

impl<W> SmartLedsOutput<W> {
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W, P> OutputDriver<P> for SmartLedsOutput<W>
where
    W: SmartLedsWrite,
    P: Pixel + Into<W::Color>,
{
    fn write(&mut self, colors: &[P]) {
        if self.writer.write(colors.iter().copied()).is_err() {
            warn!("driver: failed to write {} pixels", colors.len());
        }
    }
}
