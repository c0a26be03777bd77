use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use shape_detect::ShapeKind;
use shape_detect_core::BoundingBox;

/// One annotated shape for a single image.
///
/// Only the kind is mandatory. Annotations without a bounding box can never
/// be matched and always count as false negatives; optional center, area
/// and expected confidence refine the accuracy metrics when present.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroundTruthShape {
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Point2<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_confidence: Option<f32>,
}

impl GroundTruthShape {
    /// Annotation with only a kind and a box.
    pub fn boxed(kind: ShapeKind, bounding_box: BoundingBox) -> Self {
        Self {
            kind,
            bounding_box: Some(bounding_box),
            center: None,
            area: None,
            expected_confidence: None,
        }
    }

    /// Annotated center, falling back to the box midpoint.
    pub fn center_point(&self) -> Option<Point2<f32>> {
        self.center.or_else(|| self.bounding_box.map(|b| b.center()))
    }
}
