//! Scoring of primitive shape detections against ground-truth annotations.
//!
//! Detections from `shape-detect` are matched to annotations greedily by
//! bounding-box IoU within each shape kind, per-image accuracy metrics are
//! derived from the matches, and a banded 0–100 score with a letter grade
//! aggregates over a batch. Every failure is a value: one bad image folds
//! in as a zero-metric result without aborting the batch.

mod ground_truth;
mod io;
mod matching;
mod metrics;
mod score;

pub use ground_truth::GroundTruthShape;
pub use io::{ground_truth_for, load_ground_truth, parse_ground_truth, EvalError, GroundTruthSet};
pub use matching::{match_shapes, MatchParams, ShapeMatch};
pub use metrics::{evaluate, EvaluationMetrics};
pub use score::{
    evaluate_image, failed_image, score_batch, score_metrics, BatchSummary, Grade,
    ImageEvaluation, OverallResult, PASS_SCORE,
};
