use image::{DynamicImage, ImageFormat};

use crate::{
    assets::codec::{ImageCodec, ImageCrateCodec},
    foundation::{
        core::{PixelBuffer, Region},
        error::{HighlightError, HighlightResult},
    },
    regions::merge::{MERGE_GAP_PX, optimize_with_gap},
    render::{
        backend::BlendBackend,
        blend::{blend, validate_alpha},
        cpu::CpuBackend,
    },
};

/// Per-call options.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HighlightOptions {
    /// Blend strength applied uniformly to every region, within `[0, 1]`.
    pub alpha: f64,
    /// Horizontal gap (pixels) across which same-band, same-color regions merge.
    pub merge_gap_px: u32,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            alpha: 0.4,
            merge_gap_px: MERGE_GAP_PX,
        }
    }
}

impl HighlightOptions {
    /// Default options with a different `alpha`.
    pub fn with_alpha(alpha: f64) -> Self {
        Self {
            alpha,
            ..Self::default()
        }
    }

    /// Check `alpha` is finite and within `[0, 1]`.
    pub fn validate(&self) -> HighlightResult<()> {
        validate_alpha(self.alpha)
    }

    /// Deserialize options from JSON, filling defaults for missing fields.
    pub fn from_json(s: &str) -> HighlightResult<Self> {
        let opts: Self = serde_json::from_str(s)
            .map_err(|e| HighlightError::validation(format!("highlight options: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }
}

/// Image input in any of the supported representations.
#[derive(Clone, Debug)]
pub enum ImageSource {
    /// Encoded bytes (PNG, JPEG, ...).
    Encoded(Vec<u8>),
    /// A decoded `image` crate handle.
    Dynamic(DynamicImage),
    /// Raw RGB8 pixels.
    Raw(PixelBuffer),
}

/// Highlight output, always in the same representation family as the [`ImageSource`].
#[derive(Clone, Debug)]
pub enum HighlightedImage {
    /// Re-encoded in the format detected on input.
    Encoded {
        /// Encoded bytes.
        bytes: Vec<u8>,
        /// Container format of `bytes`.
        format: ImageFormat,
    },
    /// An `ImageRgb8` handle.
    Dynamic(DynamicImage),
    /// Raw RGB8 pixels.
    Raw(PixelBuffer),
}

/// Counters describing one blend call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HighlightStats {
    /// Regions passed in.
    pub regions_in: usize,
    /// Regions left after merging.
    pub regions_optimized: usize,
    /// Batch patch height.
    pub max_h: u32,
    /// Batch patch width.
    pub max_w: u32,
}

/// Highlight `regions` on an image given in any supported representation.
///
/// Uses the CPU backend and the `image` crate codec. See [`highlight_with`].
pub fn highlight(
    source: ImageSource,
    regions: &[Region],
    opts: &HighlightOptions,
) -> HighlightResult<HighlightedImage> {
    highlight_with(
        source,
        regions,
        opts,
        &mut CpuBackend::default(),
        &ImageCrateCodec,
    )
}

/// Highlight with an explicit backend and codec.
///
/// Encoded input is decoded, highlighted and re-encoded in its original format; handle input
/// is converted to RGB8 and returned as an `ImageRgb8` handle; raw input skips the codec.
#[tracing::instrument(skip_all, fields(regions = regions.len()))]
pub fn highlight_with(
    source: ImageSource,
    regions: &[Region],
    opts: &HighlightOptions,
    backend: &mut dyn BlendBackend,
    codec: &dyn ImageCodec,
) -> HighlightResult<HighlightedImage> {
    match source {
        ImageSource::Encoded(bytes) => {
            let (buffer, format) = codec.decode(&bytes)?;
            tracing::debug!(?format, width = buffer.width(), height = buffer.height(), "decoded");
            let out = highlight_buffer_with(&buffer, regions, opts, backend)?;
            let bytes = codec.encode(&out, format)?;
            Ok(HighlightedImage::Encoded { bytes, format })
        }
        ImageSource::Dynamic(img) => {
            let buffer = codec.to_buffer(&img);
            let out = highlight_buffer_with(&buffer, regions, opts, backend)?;
            Ok(HighlightedImage::Dynamic(codec.to_handle(out)?))
        }
        ImageSource::Raw(buffer) => Ok(HighlightedImage::Raw(highlight_buffer_with(
            &buffer, regions, opts, backend,
        )?)),
    }
}

/// Highlight raw RGB8 pixels with the CPU backend.
pub fn highlight_buffer(
    image: &PixelBuffer,
    regions: &[Region],
    opts: &HighlightOptions,
) -> HighlightResult<PixelBuffer> {
    highlight_buffer_with(image, regions, opts, &mut CpuBackend::default())
}

/// Highlight raw RGB8 pixels with an explicit backend.
pub fn highlight_buffer_with(
    image: &PixelBuffer,
    regions: &[Region],
    opts: &HighlightOptions,
    backend: &mut dyn BlendBackend,
) -> HighlightResult<PixelBuffer> {
    highlight_buffer_with_stats(image, regions, opts, backend).map(|(out, _)| out)
}

/// Validate, merge and blend; also report batch counters.
pub fn highlight_buffer_with_stats(
    image: &PixelBuffer,
    regions: &[Region],
    opts: &HighlightOptions,
    backend: &mut dyn BlendBackend,
) -> HighlightResult<(PixelBuffer, HighlightStats)> {
    opts.validate()?;
    for r in regions {
        r.validate()?;
    }

    let optimized = optimize_with_gap(regions, opts.merge_gap_px);
    let stats = HighlightStats {
        regions_in: regions.len(),
        regions_optimized: optimized.len(),
        max_h: optimized.iter().map(|r| r.h).max().unwrap_or(0),
        max_w: optimized.iter().map(|r| r.w).max().unwrap_or(0),
    };

    let out = blend(image, &optimized, opts.alpha, backend)?;
    Ok((out, stats))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline/pipeline.rs"]
mod tests;
