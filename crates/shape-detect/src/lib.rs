//! Rule-based detection of geometric primitives in raster images.
//!
//! The pipeline binarizes an image against its global mean luminance,
//! segments connected foreground regions, extracts per-region geometric
//! descriptors and classifies each region as a circle, triangle,
//! rectangle, pentagon or star via a fixed-priority decision list.
//!
//! ## Quickstart
//!
//! ```no_run
//! use shape_detect::detect;
//! use image::ImageReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = ImageReader::open("shapes.png")?.decode()?;
//! let result = detect::detect_image_default(&img)?;
//! for shape in &result.shapes {
//!     println!("{} at {:?} ({:.0}%)", shape.kind.label(), shape.bounding_box,
//!         shape.confidence * 100.0);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - [`ShapeDetector`]: the pipeline over raw buffer views.
//! - [`ShapeFeatures`] / [`extract_features`]: per-region descriptors.
//! - [`ClassifierParams`] / [`classify_features`]: the ordered rule list.
//! - [`detect`] (feature `image`): helpers from `image` crate buffers.
//! - [`core`]: binarization, segmentation and view types, re-exported.

pub use shape_detect_core as core;

mod classify;
mod detector;
mod features;
mod types;

pub use classify::{classify as classify_features, Classification, ClassifierParams};
pub use detector::{DetectError, DetectorParams, ShapeDetector};
pub use features::{extract_features, ShapeFeatures};
pub use types::{DetectedShape, DetectionResult, ShapeKind};

pub use shape_detect_core::{BoundingBox, MaskPolarity, SegmenterParams};

#[cfg(feature = "image")]
pub mod detect;
