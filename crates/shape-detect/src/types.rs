use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use shape_detect_core::BoundingBox;

/// Geometric primitive kinds this detector can report.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Triangle,
    Rectangle,
    Pentagon,
    Star,
}

impl ShapeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Pentagon => "pentagon",
            ShapeKind::Star => "star",
        }
    }
}

/// One classified shape.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DetectedShape {
    pub kind: ShapeKind,
    /// Classification confidence in [0, 1].
    pub confidence: f32,
    pub bounding_box: BoundingBox,
    /// Bounding-box midpoint in pixel coordinates.
    pub center: Point2<f32>,
    /// Region pixel count.
    pub area: usize,
}

/// Everything detected in one image.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Shapes in region-scan order.
    pub shapes: Vec<DetectedShape>,
    pub processing_time_ms: f64,
    pub image_width: usize,
    pub image_height: usize,
}
