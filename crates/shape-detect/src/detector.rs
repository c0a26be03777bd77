use std::time::Instant;

use serde::{Deserialize, Serialize};

use shape_detect_core::{
    binarize_plane, segment_mask, CoreError, GrayImageView, RgbaImageView, SegmenterParams,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::classify::{classify, ClassifierParams};
use crate::features::extract_features;
use crate::types::{DetectedShape, DetectionResult};

/// Errors produced by the detection pipeline.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Full pipeline configuration.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct DetectorParams {
    #[serde(default)]
    pub segmenter: SegmenterParams,
    #[serde(default)]
    pub classifier: ClassifierParams,
}

/// Primitive shape detector: binarization, segmentation, feature
/// extraction and rule-based classification over one pixel buffer.
///
/// Detection is a pure function of the input buffer and parameters; the
/// buffer is never mutated and no state survives between calls. An image
/// with no detectable shapes is a valid, empty result.
pub struct ShapeDetector {
    params: DetectorParams,
}

impl ShapeDetector {
    pub fn new(params: DetectorParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    /// Detect shapes in an RGBA buffer.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, view), fields(width = view.width, height = view.height))
    )]
    pub fn detect_rgba(&self, view: &RgbaImageView<'_>) -> Result<DetectionResult, DetectError> {
        self.detect_plane(view.width, view.height, &view.luminance())
    }

    /// Detect shapes in a single-channel buffer.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, view), fields(width = view.width, height = view.height))
    )]
    pub fn detect_gray(&self, view: &GrayImageView<'_>) -> Result<DetectionResult, DetectError> {
        self.detect_plane(view.width, view.height, &view.luminance())
    }

    fn detect_plane(
        &self,
        width: usize,
        height: usize,
        luma: &[f32],
    ) -> Result<DetectionResult, DetectError> {
        if width == 0 || height == 0 {
            return Err(CoreError::EmptyImage { width, height }.into());
        }

        let started = Instant::now();

        let (mask, polarity) = binarize_plane(width, height, luma);
        let regions = segment_mask(&mask, &self.params.segmenter);

        let shapes: Vec<DetectedShape> = regions
            .iter()
            .filter_map(|region| extract_features(region, &mask))
            .filter_map(|features| {
                classify(&features, &self.params.classifier).map(|c| DetectedShape {
                    kind: c.kind,
                    confidence: c.confidence,
                    bounding_box: features.bounding_box,
                    center: features.center,
                    area: features.area,
                })
            })
            .collect();

        let processing_time_ms = started.elapsed().as_secs_f64() * 1e3;
        log::info!(
            "detected {} shape(s) in {}x{} ({:?}, {:.2} ms)",
            shapes.len(),
            width,
            height,
            polarity,
            processing_time_ms
        );

        Ok(DetectionResult {
            shapes,
            processing_time_ms,
            image_width: width,
            image_height: height,
        })
    }
}

impl Default for ShapeDetector {
    fn default() -> Self {
        Self::new(DetectorParams::default())
    }
}
