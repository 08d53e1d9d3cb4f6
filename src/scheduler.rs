//! Tick pacing for the cooperative control loop.
//!
//! The loop polls as fast as it likes; the scheduler only lets the engine
//! advance once more than `interval` has passed since the last advance and
//! reports the real elapsed time so fades stay wall-clock accurate.

use embassy_time::{Duration, Instant};

/// Elapsed-time throttle for engine ticks
#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: Duration,
    last_tick: Instant,
}

impl TickScheduler {
    /// Create a scheduler whose first tick is due `interval` after `now`
    pub const fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_tick: now,
        }
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Check whether a tick is due
    ///
    /// Returns the time elapsed since the previous tick when more than
    /// `interval` has passed, and restarts the measurement from `now`.
    pub fn poll(&mut self, now: Instant) -> Option<Duration> {
        let elapsed = now.saturating_duration_since(self.last_tick);
        if elapsed <= self.interval {
            return None;
        }
        self.last_tick = now;
        Some(elapsed)
    }
}
