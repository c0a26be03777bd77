//! Core raster types and the early pipeline stages for primitive shape
//! detection: buffer views, global-mean binarization and connected-component
//! segmentation.
//!
//! This crate does *not* classify anything; it turns a pixel buffer into a
//! list of candidate foreground regions and leaves geometry interpretation
//! to `shape-detect`.

mod bbox;
mod error;
mod image;
mod logger;
mod mask;
mod region;

pub use bbox::BoundingBox;
pub use error::CoreError;
pub use image::{GrayImageView, RgbaImageView};
pub use mask::{binarize_gray, binarize_plane, binarize_rgba, BinaryMask, MaskPolarity};
pub use region::{segment_mask, Region, SegmenterParams};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
