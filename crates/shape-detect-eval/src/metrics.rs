//! Per-image accuracy metrics.

use serde::{Deserialize, Serialize};

use shape_detect::DetectionResult;

use crate::ground_truth::GroundTruthShape;
use crate::matching::{match_shapes, MatchParams, ShapeMatch};

/// Accuracy metrics for one image.
///
/// Pair-derived fields follow fixed conventions when no pair supplies the
/// underlying data: `average_iou` and `area_accuracy` drop to 0 when
/// nothing matched, `center_point_accuracy` is `None` (so no locality
/// credit is awarded), and `area_accuracy`/`confidence_calibration` are
/// vacuously 1.0 when pairs matched but the annotations omit the field.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    /// TP / detections, 0 with no detections.
    pub precision: f64,
    /// TP / annotations, 1 with an empty annotation set.
    pub recall: f64,
    pub f1: f64,
    /// Mean IoU over matched pairs.
    pub average_iou: f64,
    /// Mean center distance in pixels over matched pairs, lower better.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_point_accuracy: Option<f64>,
    /// 1 − mean relative area error, floored at 0.
    pub area_accuracy: f64,
    /// 1 − mean absolute confidence error against expected confidences.
    pub confidence_calibration: f64,
    pub processing_time_ms: f64,
}

impl EvaluationMetrics {
    /// All-zero metrics for an image whose evaluation failed outright.
    pub fn zeroed() -> Self {
        Self {
            precision: 0.0,
            recall: 0.0,
            f1: 0.0,
            average_iou: 0.0,
            center_point_accuracy: None,
            area_accuracy: 0.0,
            confidence_calibration: 0.0,
            processing_time_ms: 0.0,
        }
    }
}

/// Score one image's detections against its annotations.
///
/// Matches greedily via [`match_shapes`], then derives counting metrics
/// over the full sets and quality metrics over the matched pairs only.
pub fn evaluate(
    detection: &DetectionResult,
    ground_truth: &[GroundTruthShape],
    params: &MatchParams,
) -> EvaluationMetrics {
    let matches = match_shapes(&detection.shapes, ground_truth, params);
    evaluate_matches(detection, ground_truth, &matches)
}

pub(crate) fn evaluate_matches(
    detection: &DetectionResult,
    ground_truth: &[GroundTruthShape],
    matches: &[ShapeMatch],
) -> EvaluationMetrics {
    let n_det = detection.shapes.len();
    let n_gt = ground_truth.len();
    let tp = matches.iter().filter(|m| m.is_true_positive()).count();

    let precision = if n_det > 0 {
        tp as f64 / n_det as f64
    } else {
        0.0
    };
    let recall = if n_gt > 0 { tp as f64 / n_gt as f64 } else { 1.0 };
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    let mut iou_sum = 0.0f64;
    let mut dist_sum = 0.0f64;
    let mut area_errors: Vec<f64> = Vec::new();
    let mut conf_errors: Vec<f64> = Vec::new();

    for m in matches {
        let Some(gt_idx) = m.ground_truth_index else {
            continue;
        };
        let det = &detection.shapes[m.detection_index];
        let gt = &ground_truth[gt_idx];

        iou_sum += m.iou as f64;
        if let Some(c) = gt.center_point() {
            dist_sum += ((det.center.x - c.x).powi(2) + (det.center.y - c.y).powi(2)).sqrt() as f64;
        }
        if let Some(gt_area) = gt.area {
            if gt_area > 0 {
                area_errors
                    .push((det.area as f64 - gt_area as f64).abs() / gt_area as f64);
            }
        }
        if let Some(expected) = gt.expected_confidence {
            conf_errors.push((det.confidence as f64 - expected as f64).abs());
        }
    }

    let (average_iou, center_point_accuracy) = if tp > 0 {
        (iou_sum / tp as f64, Some(dist_sum / tp as f64))
    } else {
        (0.0, None)
    };

    let area_accuracy = if tp == 0 {
        0.0
    } else if area_errors.is_empty() {
        1.0
    } else {
        (1.0 - mean(&area_errors)).max(0.0)
    };

    let confidence_calibration = if tp == 0 {
        0.0
    } else if conf_errors.is_empty() {
        1.0
    } else {
        (1.0 - mean(&conf_errors)).max(0.0)
    };

    EvaluationMetrics {
        precision,
        recall,
        f1,
        average_iou,
        center_point_accuracy,
        area_accuracy,
        confidence_calibration,
        processing_time_ms: detection.processing_time_ms,
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
