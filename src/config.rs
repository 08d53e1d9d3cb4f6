//! Device constants
//!
//! Capacities are const generics everywhere else; the values here describe
//! the stock indicator board.

use embassy_time::Duration;

use crate::color::Hsi;

/// Number of screens that can be registered
pub const SCREEN_COUNT: usize = 20;

/// Number of LEDs on the strip
pub const PIXEL_COUNT: usize = 10;

/// LEDs lit together for one indicator
pub const PIXELS_PER_SEGMENT: u8 = 1;

/// Number of indicator segments
pub const SEGMENT_COUNT: usize = PIXEL_COUNT / PIXELS_PER_SEGMENT as usize;

/// Time for a full fade from dark to lit (and for a full color change)
pub const FADE_DURATION: Duration = Duration::from_millis(250);

/// Minimum time between two engine ticks (~30 fps)
pub const TICK_INTERVAL: Duration = Duration::from_millis(33);

/// Tokens read from one command line, excess is ignored
pub const MAX_TOKENS: usize = 4;

/// Longest accepted command line in bytes
pub const LINE_CAPACITY: usize = 64;

/// Longest screen name in bytes
pub const MAX_NAME_LEN: usize = 32;

/// Indicator color used on first boot and by `reset`
pub const DEFAULT_COLOR: Hsi = Hsi::new(78.0, 1.0, 128);

/// Flash offset of the configuration record
pub const CONFIG_PARTITION_OFFSET: u32 = 0x31_0000;

/// Size of the configuration record buffer (header included)
pub const CONFIG_STORAGE_SIZE: usize = 1024;
