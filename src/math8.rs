use embassy_time::Duration;

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems. A scale of 255
/// returns the value unchanged, matching the NeoPixel brightness stage.
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Clamp a value into `[0.0, 1.0]`, mapping NaN to zero
#[inline]
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Fraction of `duration` covered by `elapsed`
///
/// Not clamped: a tick longer than the fade duration yields a value above 1.
/// A zero duration means "complete immediately".
#[allow(clippy::cast_precision_loss)]
#[inline]
pub fn progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.as_millis() == 0 {
        return 1.0;
    }
    elapsed.as_millis() as f32 / duration.as_millis() as f32
}
