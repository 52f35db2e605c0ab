use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbImage};

use crate::foundation::{
    core::PixelBuffer,
    error::{HighlightError, HighlightResult},
};

/// Boundary to an image codec: encoded bytes and native handles in and out of [`PixelBuffer`].
pub trait ImageCodec {
    /// Decode encoded bytes, reporting the detected container format.
    fn decode(&self, bytes: &[u8]) -> HighlightResult<(PixelBuffer, ImageFormat)>;

    /// Encode `buffer` into `format`.
    fn encode(&self, buffer: &PixelBuffer, format: ImageFormat) -> HighlightResult<Vec<u8>>;

    /// Convert a decoded handle into RGB8 pixels.
    fn to_buffer(&self, image: &DynamicImage) -> PixelBuffer;

    /// Wrap RGB8 pixels in a decoded handle.
    fn to_handle(&self, buffer: PixelBuffer) -> HighlightResult<DynamicImage>;
}

/// [`ImageCodec`] backed by the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageCrateCodec;

impl ImageCodec for ImageCrateCodec {
    fn decode(&self, bytes: &[u8]) -> HighlightResult<(PixelBuffer, ImageFormat)> {
        decode(bytes)
    }

    fn encode(&self, buffer: &PixelBuffer, format: ImageFormat) -> HighlightResult<Vec<u8>> {
        encode(buffer, format)
    }

    fn to_buffer(&self, image: &DynamicImage) -> PixelBuffer {
        from_dynamic(image)
    }

    fn to_handle(&self, buffer: PixelBuffer) -> HighlightResult<DynamicImage> {
        to_dynamic(buffer)
    }
}

/// Decode encoded image bytes into RGB8 pixels. Any alpha channel is dropped.
pub fn decode(bytes: &[u8]) -> HighlightResult<(PixelBuffer, ImageFormat)> {
    let format = image::guess_format(bytes)
        .map_err(|e| HighlightError::decode(format!("unrecognized image format: {e}")))?;
    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| HighlightError::decode(format!("{format:?}: {e}")))?;
    Ok((from_dynamic(&img), format))
}

/// Encode RGB8 pixels into `format`.
pub fn encode(buffer: &PixelBuffer, format: ImageFormat) -> HighlightResult<Vec<u8>> {
    let img = to_dynamic(buffer.clone())?;
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), format)
        .map_err(|e| HighlightError::encode(format!("{format:?}: {e}")))?;
    Ok(out)
}

/// Convert any `image` handle to RGB8 pixels. Any alpha channel is dropped.
pub fn from_dynamic(image: &DynamicImage) -> PixelBuffer {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    PixelBuffer::from_raw_parts(width, height, rgb.into_raw())
}

/// Wrap RGB8 pixels in an `ImageRgb8` handle.
pub fn to_dynamic(buffer: PixelBuffer) -> HighlightResult<DynamicImage> {
    let (width, height) = buffer.dimensions();
    let rgb = RgbImage::from_raw(width, height, buffer.into_raw())
        .ok_or_else(|| HighlightError::shape("pixel buffer does not fit an RGB8 image"))?;
    Ok(DynamicImage::ImageRgb8(rgb))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/codec.rs"]
mod tests;
