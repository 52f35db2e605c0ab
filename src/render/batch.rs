use rayon::prelude::*;

use crate::foundation::{
    core::{CHANNELS, OptimizedRegion, PixelBuffer, Rgb8, byte_len},
    error::{HighlightError, HighlightResult},
    math::checked_area,
};

/// Optimized regions stacked into uniform `[max_h, max_w]` arrays.
///
/// Every region gets a mask of the same shape; cells outside its own `h x w` rectangle are
/// zero so the blend kernel can treat all regions identically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Batch {
    /// Maximum `h` over the batch.
    pub max_h: u32,
    /// Maximum `w` over the batch.
    pub max_w: u32,
    /// `(y, x)` patch origins, in list order.
    pub starts: Vec<(u32, u32)>,
    /// `max_h * max_w` planes of 0/1, row-major, in list order.
    pub masks: Vec<Vec<u8>>,
    /// Fill colors, in list order.
    pub colors: Vec<Rgb8>,
}

impl Batch {
    /// Build the batch sequentially.
    pub fn build(regions: &[OptimizedRegion]) -> HighlightResult<Self> {
        let (max_h, max_w, plane) = batch_shape(regions)?;
        let masks = regions
            .iter()
            .map(|r| build_mask(r, max_h, max_w, plane))
            .collect();
        Ok(Self::assemble(regions, max_h, max_w, masks))
    }

    /// Build the batch with masks computed on `pool`; list order is preserved.
    pub fn build_parallel(
        regions: &[OptimizedRegion],
        pool: &rayon::ThreadPool,
    ) -> HighlightResult<Self> {
        let (max_h, max_w, plane) = batch_shape(regions)?;
        let masks = pool.install(|| {
            regions
                .par_iter()
                .map(|r| build_mask(r, max_h, max_w, plane))
                .collect::<Vec<_>>()
        });
        Ok(Self::assemble(regions, max_h, max_w, masks))
    }

    /// Number of regions in the batch.
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    /// Whether the batch holds no regions.
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    fn assemble(regions: &[OptimizedRegion], max_h: u32, max_w: u32, masks: Vec<Vec<u8>>) -> Self {
        Self {
            max_h,
            max_w,
            starts: regions.iter().map(|r| (r.y, r.x)).collect(),
            masks,
            colors: regions.iter().map(|r| r.color).collect(),
        }
    }
}

fn batch_shape(regions: &[OptimizedRegion]) -> HighlightResult<(u32, u32, usize)> {
    if regions.is_empty() {
        return Err(HighlightError::shape("cannot build a batch from zero regions"));
    }
    let max_h = regions.iter().map(|r| r.h).max().unwrap_or(0);
    let max_w = regions.iter().map(|r| r.w).max().unwrap_or(0);
    let plane = checked_area(max_h, max_w)
        .ok_or_else(|| HighlightError::compute("batch mask size overflow"))?;
    Ok((max_h, max_w, plane))
}

fn build_mask(r: &OptimizedRegion, max_h: u32, max_w: u32, plane: usize) -> Vec<u8> {
    let mut mask = vec![0u8; plane];
    if plane == 0 {
        return mask;
    }
    let (h, w) = (r.h.min(max_h) as usize, r.w.min(max_w) as usize);
    for row in mask.chunks_exact_mut(max_w as usize).take(h) {
        row[..w].fill(1);
    }
    mask
}

/// The base image extended by `max_h` zero rows and `max_w` zero columns.
///
/// The top-left `width x height` block is the untouched original, so any `[max_h, max_w]`
/// patch starting inside the original stays in bounds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaddedImage {
    /// Width of the original image.
    pub width: u32,
    /// Height of the original image.
    pub height: u32,
    /// Padded width (`width + max_w`).
    pub padded_width: u32,
    /// Padded height (`height + max_h`).
    pub padded_height: u32,
    /// RGB8 bytes in the padded layout.
    pub data: Vec<u8>,
}

impl PaddedImage {
    /// Copy `image` into a zero-filled canvas `max_h` rows taller and `max_w` columns wider.
    pub fn pad(image: &PixelBuffer, max_h: u32, max_w: u32) -> HighlightResult<Self> {
        let (width, height) = image.dimensions();
        let padded_width = width
            .checked_add(max_w)
            .ok_or_else(|| HighlightError::compute("padded width overflow"))?;
        let padded_height = height
            .checked_add(max_h)
            .ok_or_else(|| HighlightError::compute("padded height overflow"))?;

        let mut data = vec![0u8; byte_len(padded_width, padded_height)?];
        let src_stride = image.row_stride();
        let dst_stride = padded_width as usize * CHANNELS;
        if src_stride > 0 {
            for (src, dst) in image
                .as_raw()
                .chunks_exact(src_stride)
                .zip(data.chunks_exact_mut(dst_stride))
            {
                dst[..src_stride].copy_from_slice(src);
            }
        }

        Ok(Self {
            width,
            height,
            padded_width,
            padded_height,
            data,
        })
    }

    pub(crate) fn stride(&self) -> usize {
        self.padded_width as usize * CHANNELS
    }

    /// Copy the original `width x height` block back out.
    pub fn crop(&self) -> HighlightResult<PixelBuffer> {
        let mut out = Vec::with_capacity(byte_len(self.width, self.height)?);
        let row_bytes = self.width as usize * CHANNELS;
        if self.stride() > 0 {
            for row in self
                .data
                .chunks_exact(self.stride())
                .take(self.height as usize)
            {
                out.extend_from_slice(&row[..row_bytes]);
            }
        }
        PixelBuffer::new(self.width, self.height, out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/batch.rs"]
mod tests;
