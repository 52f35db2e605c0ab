use crate::foundation::error::{HighlightError, HighlightResult};

/// Straight RGB8 color.
pub type Rgb8 = [u8; 3];

/// Bytes per pixel in a [`PixelBuffer`].
pub const CHANNELS: usize = 3;

/// A caller-specified rectangle plus solid fill color to highlight.
///
/// Serialized as the record `{x, y, w, h, color: [r, g, b]}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Region {
    /// Left edge in pixels.
    pub x: u32,
    /// Top edge in pixels.
    pub y: u32,
    /// Width in pixels.
    pub w: u32,
    /// Height in pixels.
    pub h: u32,
    /// Fill color.
    pub color: Rgb8,
}

/// A [`Region`] after merging; `w` may span several original regions.
pub type OptimizedRegion = Region;

impl Region {
    /// Construct a region without validating it.
    pub fn new(x: u32, y: u32, w: u32, h: u32, color: Rgb8) -> Self {
        Self { x, y, w, h, color }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Pixel count covered by the rectangle.
    pub fn area(&self) -> u64 {
        u64::from(self.w) * u64::from(self.h)
    }

    /// Whether pixel `(x, y)` lies inside the rectangle.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.x <= x && x < self.right() && self.y <= y && y < self.bottom()
    }

    /// Reject degenerate rectangles.
    pub fn validate(&self) -> HighlightResult<()> {
        if self.w == 0 || self.h == 0 {
            return Err(HighlightError::shape(format!(
                "region at ({}, {}) must have w > 0 and h > 0 (got {}x{})",
                self.x, self.y, self.w, self.h
            )));
        }
        Ok(())
    }
}

/// Parse an external region list (a JSON array of `{x, y, w, h, color}` records).
pub fn regions_from_json(s: &str) -> HighlightResult<Vec<Region>> {
    serde_json::from_str(s).map_err(|e| HighlightError::shape(format!("region list: {e}")))
}

/// Row-major, channel-last RGB8 pixels shaped `[height, width, 3]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw bytes; `data.len()` must equal `width * height * 3`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> HighlightResult<Self> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(HighlightError::shape(format!(
                "pixel buffer {width}x{height} expects {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Caller guarantees `data.len() == width * height * 3`.
    pub(crate) fn from_raw_parts(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * CHANNELS);
        Self {
            width,
            height,
            data,
        }
    }

    /// A buffer with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Rgb8) -> HighlightResult<Self> {
        let len = byte_len(width, height)?;
        let data = color.iter().copied().cycle().take(len).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// Raw row-major RGB8 bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return its bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub(crate) fn row_stride(&self) -> usize {
        self.width as usize * CHANNELS
    }
}

pub(crate) fn byte_len(width: u32, height: u32) -> HighlightResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(CHANNELS))
        .ok_or_else(|| HighlightError::compute("pixel buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
