//! Greedy assignment of detections to ground-truth annotations.

use serde::{Deserialize, Serialize};

use shape_detect::DetectedShape;

use crate::ground_truth::GroundTruthShape;

/// Matching settings.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MatchParams {
    /// Minimum bounding-box IoU (strict) to accept a pairing.
    pub iou_threshold: f32,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self { iou_threshold: 0.5 }
    }
}

/// Pairing of one detection with at most one ground-truth annotation.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ShapeMatch {
    pub detection_index: usize,
    /// `None` marks a false positive.
    pub ground_truth_index: Option<usize>,
    /// IoU of the accepted pairing, 0 for false positives.
    pub iou: f32,
}

impl ShapeMatch {
    #[inline]
    pub fn is_true_positive(&self) -> bool {
        self.ground_truth_index.is_some()
    }
}

/// Match detections against ground truth, greedily in detection order.
///
/// Each detection scans the still-unmatched annotations of its own kind and
/// takes the best-IoU candidate above the threshold; earlier detections get
/// first choice. The mapping is partially injective: an annotation is never
/// assigned twice. Returns one entry per detection.
pub fn match_shapes(
    detections: &[DetectedShape],
    ground_truth: &[GroundTruthShape],
    params: &MatchParams,
) -> Vec<ShapeMatch> {
    let mut taken = vec![false; ground_truth.len()];
    let mut matches = Vec::with_capacity(detections.len());

    for (det_idx, det) in detections.iter().enumerate() {
        let mut best_iou = 0.0f32;
        let mut best_gt: Option<usize> = None;

        for (gt_idx, gt) in ground_truth.iter().enumerate() {
            if taken[gt_idx] || gt.kind != det.kind {
                continue;
            }
            let Some(gt_box) = gt.bounding_box else {
                continue;
            };
            let iou = det.bounding_box.iou(&gt_box);
            if iou > params.iou_threshold && iou > best_iou {
                best_iou = iou;
                best_gt = Some(gt_idx);
            }
        }

        if let Some(gt_idx) = best_gt {
            taken[gt_idx] = true;
            matches.push(ShapeMatch {
                detection_index: det_idx,
                ground_truth_index: Some(gt_idx),
                iou: best_iou,
            });
        } else {
            matches.push(ShapeMatch {
                detection_index: det_idx,
                ground_truth_index: None,
                iou: 0.0,
            });
        }
    }

    let tp = matches.iter().filter(|m| m.is_true_positive()).count();
    log::debug!(
        "matched {} of {} detection(s) against {} annotation(s)",
        tp,
        detections.len(),
        ground_truth.len()
    );
    matches
}
