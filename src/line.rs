//! Serial line framing.
//!
//! Bytes are collected until `\n`; `\r` is dropped so both `\n` and `\r\n`
//! terminated hosts work. A line that does not fit the buffer, or that is
//! not valid UTF-8, is discarded as a whole and framing resumes after the
//! next newline.

use heapless::{String, Vec};
use log::warn;

/// Fixed-capacity command line accumulator
#[derive(Debug, Default)]
pub struct LineBuffer<const N: usize> {
    buffer: Vec<u8, N>,
    overflowed: bool,
}

impl<const N: usize> LineBuffer<N> {
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Feed one received byte
    ///
    /// Returns the completed line when `byte` terminates it.
    pub fn push(&mut self, byte: u8) -> Option<String<N>> {
        match byte {
            b'\r' => None,
            b'\n' => self.take_line(),
            _ => {
                if !self.overflowed && self.buffer.push(byte).is_err() {
                    self.overflowed = true;
                }
                None
            }
        }
    }

    /// Number of bytes buffered for the current line
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    fn take_line(&mut self) -> Option<String<N>> {
        let overflowed = core::mem::take(&mut self.overflowed);
        let bytes = core::mem::take(&mut self.buffer);
        if overflowed {
            warn!("line: discarding command longer than {} bytes", N);
            return None;
        }

        let Ok(text) = core::str::from_utf8(&bytes) else {
            warn!("line: discarding command that is not valid UTF-8");
            return None;
        };
        let mut line = String::new();
        line.push_str(text).ok()?;
        Some(line)
    }
}
