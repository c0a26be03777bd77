//! Banded scoring and batch aggregation.

use serde::{Deserialize, Serialize};

use shape_detect::DetectionResult;

use crate::ground_truth::GroundTruthShape;
use crate::matching::MatchParams;
use crate::metrics::{evaluate, EvaluationMetrics};

/// Score needed for an image to pass.
pub const PASS_SCORE: f64 = 60.0;

/// (threshold, points) bands, best first. `band_at_least` awards the first
/// row whose threshold the value reaches; `band_at_most` the first row it
/// stays under.
const F1_BANDS: [(f64, f64); 3] = [(0.9, 40.0), (0.7, 30.0), (0.5, 20.0)];
const IOU_BANDS: [(f64, f64); 3] = [(0.8, 25.0), (0.6, 20.0), (0.4, 10.0)];
const CENTER_BANDS: [(f64, f64); 3] = [(5.0, 15.0), (10.0, 12.0), (20.0, 8.0)];
const AREA_BANDS: [(f64, f64); 3] = [(0.9, 10.0), (0.8, 8.0), (0.7, 5.0)];
const TIME_BANDS: [(f64, f64); 3] = [(500.0, 10.0), (1000.0, 8.0), (2000.0, 5.0)];

fn band_at_least(value: f64, bands: &[(f64, f64)]) -> f64 {
    bands
        .iter()
        .find(|(cutoff, _)| value >= *cutoff)
        .map_or(0.0, |(_, points)| *points)
}

fn band_at_most(value: f64, bands: &[(f64, f64)]) -> f64 {
    bands
        .iter()
        .find(|(cutoff, _)| value <= *cutoff)
        .map_or(0.0, |(_, points)| *points)
}

/// Weighted 0–100 score from one image's metrics.
pub fn score_metrics(metrics: &EvaluationMetrics) -> f64 {
    band_at_least(metrics.f1, &F1_BANDS)
        + band_at_least(metrics.average_iou, &IOU_BANDS)
        + metrics
            .center_point_accuracy
            .map_or(0.0, |d| band_at_most(d, &CENTER_BANDS))
        + band_at_least(metrics.area_accuracy, &AREA_BANDS)
        + band_at_most(metrics.processing_time_ms, &TIME_BANDS)
}

/// Letter grade over a 0–100 percentage.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Grade::A
        } else if percentage >= 80.0 {
            Grade::B
        } else if percentage >= 70.0 {
            Grade::C
        } else if percentage >= 60.0 {
            Grade::D
        } else {
            Grade::F
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = match self {
            Grade::A => 'A',
            Grade::B => 'B',
            Grade::C => 'C',
            Grade::D => 'D',
            Grade::F => 'F',
        };
        write!(f, "{c}")
    }
}

/// Scored outcome for one image.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImageEvaluation {
    pub image_id: String,
    pub passed: bool,
    pub score: f64,
    pub metrics: EvaluationMetrics,
    pub feedback: String,
}

/// Evaluate and score one image.
pub fn evaluate_image(
    image_id: &str,
    detection: &DetectionResult,
    ground_truth: &[GroundTruthShape],
    params: &MatchParams,
) -> ImageEvaluation {
    let metrics = evaluate(detection, ground_truth, params);
    let score = score_metrics(&metrics);
    let feedback = feedback_line(detection, ground_truth, &metrics);
    ImageEvaluation {
        image_id: image_id.to_string(),
        passed: score >= PASS_SCORE,
        score,
        metrics,
        feedback,
    }
}

/// Zero-metric failed result for an image whose evaluation could not run
/// (missing annotations, unreadable source). Keeps batch runs going.
pub fn failed_image(image_id: &str, reason: impl std::fmt::Display) -> ImageEvaluation {
    log::warn!("evaluation of '{image_id}' failed: {reason}");
    ImageEvaluation {
        image_id: image_id.to_string(),
        passed: false,
        score: 0.0,
        metrics: EvaluationMetrics::zeroed(),
        feedback: format!("evaluation failed: {reason}"),
    }
}

fn feedback_line(
    detection: &DetectionResult,
    ground_truth: &[GroundTruthShape],
    metrics: &EvaluationMetrics,
) -> String {
    let tp = (metrics.recall * ground_truth.len() as f64).round() as usize;
    let fp = detection.shapes.len() - tp.min(detection.shapes.len());
    let mut parts = vec![format!(
        "matched {tp}/{} annotated shape(s), {fp} false positive(s)",
        ground_truth.len()
    )];
    if let Some(dist) = metrics.center_point_accuracy {
        parts.push(format!("mean center error {dist:.1} px"));
    }
    parts.push(format!("mean IoU {:.2}", metrics.average_iou));
    parts.join("; ")
}

/// Batch-level averages over all scored images.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub mean_precision: f64,
    pub mean_recall: f64,
    pub mean_f1: f64,
    pub mean_iou: f64,
    pub mean_processing_time_ms: f64,
}

/// Aggregated outcome of a batch run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OverallResult {
    /// Sum of per-image scores.
    pub total_score: f64,
    /// `total_score / count`, on a 0–100 scale.
    pub percentage: f64,
    pub grade: Grade,
    pub passed_images: usize,
    pub summary: BatchSummary,
    pub images: Vec<ImageEvaluation>,
}

/// Fold per-image evaluations into the batch result.
pub fn score_batch(images: Vec<ImageEvaluation>) -> OverallResult {
    let n = images.len();
    let total_score: f64 = images.iter().map(|e| e.score).sum();
    let percentage = if n > 0 { total_score / n as f64 } else { 0.0 };
    let passed_images = images.iter().filter(|e| e.passed).count();

    let summary = if n > 0 {
        let inv = 1.0 / n as f64;
        BatchSummary {
            mean_precision: images.iter().map(|e| e.metrics.precision).sum::<f64>() * inv,
            mean_recall: images.iter().map(|e| e.metrics.recall).sum::<f64>() * inv,
            mean_f1: images.iter().map(|e| e.metrics.f1).sum::<f64>() * inv,
            mean_iou: images.iter().map(|e| e.metrics.average_iou).sum::<f64>() * inv,
            mean_processing_time_ms: images
                .iter()
                .map(|e| e.metrics.processing_time_ms)
                .sum::<f64>()
                * inv,
        }
    } else {
        BatchSummary::default()
    };

    let grade = Grade::from_percentage(percentage);
    log::info!(
        "batch: {}/{} image(s) passed, {:.1}% ({})",
        passed_images,
        n,
        percentage,
        grade
    );

    OverallResult {
        total_score,
        percentage,
        grade,
        passed_images,
        summary,
        images,
    }
}
