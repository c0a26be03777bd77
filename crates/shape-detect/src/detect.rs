//! End-to-end helpers from `image` crate buffers.
//!
//! The pipeline itself only sees borrowed raw buffers; these adapters are
//! the glue between decoded images and [`ShapeDetector`].

use shape_detect_core::{GrayImageView, RgbaImageView};

use crate::detector::{DetectError, DetectorParams, ShapeDetector};
use crate::types::DetectionResult;

/// Convert an `image::RgbaImage` into the lightweight core view type.
pub fn rgba_view(img: &::image::RgbaImage) -> RgbaImageView<'_> {
    RgbaImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Convert an `image::GrayImage` into the lightweight core view type.
pub fn gray_view(img: &::image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Detect shapes in a decoded image.
pub fn detect_image(
    img: &::image::DynamicImage,
    params: DetectorParams,
) -> Result<DetectionResult, DetectError> {
    let rgba = img.to_rgba8();
    ShapeDetector::new(params).detect_rgba(&rgba_view(&rgba))
}

/// Convenience overload using default parameters.
pub fn detect_image_default(img: &::image::DynamicImage) -> Result<DetectionResult, DetectError> {
    detect_image(img, DetectorParams::default())
}

/// Detect shapes in a raw RGBA buffer (row-major, 4 bytes per pixel).
pub fn detect_rgba_from_raw(
    width: u32,
    height: u32,
    pixels: &[u8],
    params: DetectorParams,
) -> Result<DetectionResult, DetectError> {
    let view = RgbaImageView::new(width as usize, height as usize, pixels)?;
    ShapeDetector::new(params).detect_rgba(&view)
}

/// Detect shapes in a raw grayscale buffer (row-major, 1 byte per pixel).
pub fn detect_gray_from_raw(
    width: u32,
    height: u32,
    pixels: &[u8],
    params: DetectorParams,
) -> Result<DetectionResult, DetectError> {
    let view = GrayImageView::new(width as usize, height as usize, pixels)?;
    ShapeDetector::new(params).detect_gray(&view)
}
