use core::ops::Range;

/// Mapping of indicator segments onto the physical strip
///
/// Segments are contiguous runs of `pixels_per_segment` LEDs starting at
/// pixel 0. A segment that does not fit the strip is clipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentLayout {
    pub pixels_per_segment: u8,
}

impl SegmentLayout {
    pub const fn new(pixels_per_segment: u8) -> Self {
        Self { pixels_per_segment }
    }

    /// Get the pixel range of a segment on a strip of `pixel_count` LEDs
    pub fn range(self, segment: usize, pixel_count: usize) -> Range<usize> {
        let width = usize::from(self.pixels_per_segment);
        let start = segment.saturating_mul(width).min(pixel_count);
        let end = start.saturating_add(width).min(pixel_count);
        start..end
    }
}

/// Get a slice of the pixels belonging to a segment
pub(crate) fn segment_pixels<P>(pixels: &mut [P], layout: SegmentLayout, segment: usize) -> &mut [P] {
    let range = layout.range(segment, pixels.len());
    &mut pixels[range]
}
