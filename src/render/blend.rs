use crate::{
    foundation::{
        core::{OptimizedRegion, PixelBuffer},
        error::{HighlightError, HighlightResult},
    },
    render::{backend::BlendBackend, batch::PaddedImage},
};

/// Composite `regions` onto `image` with one batched pass and return a new buffer.
///
/// 1. Build a uniform `[max_h, max_w]` batch of masks/colors/origins.
/// 2. Pad the base by `max_h` rows and `max_w` columns.
/// 3. Let `backend` blend every patch against the pristine padded base, in list order.
/// 4. Crop back to the original `width x height`.
///
/// An empty region list returns a copy of `image`. Overlaps resolve last-write-wins: the last
/// region in `regions` whose rectangle covers a pixel decides that pixel.
#[tracing::instrument(skip(image, regions, backend), fields(regions = regions.len()))]
pub fn blend(
    image: &PixelBuffer,
    regions: &[OptimizedRegion],
    alpha: f64,
    backend: &mut dyn BlendBackend,
) -> HighlightResult<PixelBuffer> {
    validate_alpha(alpha)?;
    if regions.is_empty() {
        return Ok(image.clone());
    }

    let batch = backend.build_batch(regions)?;
    tracing::debug!(
        max_h = batch.max_h,
        max_w = batch.max_w,
        len = batch.len(),
        "built blend batch"
    );

    let padded = PaddedImage::pad(image, batch.max_h, batch.max_w)?;
    let canvas = backend.execute(&padded, &batch, alpha)?;
    if (canvas.padded_width, canvas.padded_height) != (padded.padded_width, padded.padded_height)
    {
        return Err(HighlightError::compute(
            "backend returned a canvas with a different padded shape",
        ));
    }
    canvas.crop()
}

pub(crate) fn validate_alpha(alpha: f64) -> HighlightResult<()> {
    if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
        return Err(HighlightError::validation(format!(
            "alpha must be within [0, 1] (got {alpha})"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
