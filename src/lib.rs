//! Batched semi-transparent rectangle highlighting for RGB8 raster images.
//!
//! A call takes a base image and a list of [`Region`]s (rectangle + solid color) and returns a
//! new image of the same shape where every region is alpha-blended with its color.
//!
//! # Pipeline overview
//!
//! 1. **Merge**: [`optimize`] groups regions by color and folds horizontally adjacent
//!    rectangles on the same row band into wider spans.
//! 2. **Batch**: the optimized list becomes a uniform `[max_h, max_w]` [`Batch`] of masks,
//!    colors and origins; the base is zero-padded into a [`PaddedImage`].
//! 3. **Blend**: a [`BlendBackend`] composites every patch against the pristine padded base,
//!    in list order, then the result is cropped back ([`blend`]).
//! 4. **Codec** (optional): [`highlight`] accepts encoded bytes or `image` handles and returns
//!    the same representation it was given.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: color groups are emitted in first-appearance order, and overlapping
//!   regions resolve last-write-wins by optimized list order.
//! - **No global state**: the compute backend is an explicit value ([`create_backend`]).
//! - **Atomic**: a call returns the full buffer or a single [`HighlightError`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod assets;
mod foundation;
mod pipeline;
mod regions;
mod render;

pub use assets::codec::{ImageCodec, ImageCrateCodec, decode, encode, from_dynamic, to_dynamic};
pub use foundation::core::{CHANNELS, OptimizedRegion, PixelBuffer, Region, Rgb8, regions_from_json};
pub use foundation::error::{HighlightError, HighlightResult};
pub use pipeline::{
    HighlightOptions, HighlightStats, HighlightedImage, ImageSource, highlight, highlight_buffer,
    highlight_buffer_with, highlight_buffer_with_stats, highlight_with,
};
pub use regions::merge::{MERGE_GAP_PX, optimize, optimize_with_gap};
pub use render::backend::{BackendKind, BlendBackend, BlendSettings, create_backend};
pub use render::batch::{Batch, PaddedImage};
pub use render::blend::blend;
pub use render::cpu::CpuBackend;

pub use image::ImageFormat;
