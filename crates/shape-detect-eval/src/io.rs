//! Ground-truth dataset loading.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::ground_truth::GroundTruthShape;

/// Map from image identifier to its annotated shapes.
pub type GroundTruthSet = HashMap<String, Vec<GroundTruthShape>>;

/// Errors raised while loading or consulting a dataset.
#[derive(thiserror::Error, Debug)]
pub enum EvalError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no annotations for image '{image_id}'")]
    MissingImage { image_id: String },
}

/// Load a JSON dataset: an object mapping image ids to annotation arrays.
pub fn load_ground_truth(path: impl AsRef<Path>) -> Result<GroundTruthSet, EvalError> {
    let raw = fs::read_to_string(path)?;
    parse_ground_truth(&raw)
}

/// Parse a dataset from a JSON string.
pub fn parse_ground_truth(raw: &str) -> Result<GroundTruthSet, EvalError> {
    let set: GroundTruthSet = serde_json::from_str(raw)?;
    log::debug!("loaded annotations for {} image(s)", set.len());
    Ok(set)
}

/// Annotations for one image, as an error when absent.
pub fn ground_truth_for<'a>(
    set: &'a GroundTruthSet,
    image_id: &str,
) -> Result<&'a [GroundTruthShape], EvalError> {
    set.get(image_id)
        .map(Vec::as_slice)
        .ok_or_else(|| EvalError::MissingImage {
            image_id: image_id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shape_detect::ShapeKind;

    const DATASET: &str = r#"{
        "shapes_001": [
            {"type": "circle", "bounding_box": {"x": 10, "y": 10, "width": 80, "height": 80},
             "area": 5024, "expected_confidence": 0.9},
            {"type": "star", "bounding_box": {"x": 120, "y": 40, "width": 60, "height": 60}}
        ],
        "shapes_002": []
    }"#;

    #[test]
    fn dataset_parses_and_indexes() {
        let set = parse_ground_truth(DATASET).unwrap();
        let shapes = ground_truth_for(&set, "shapes_001").unwrap();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].kind, ShapeKind::Circle);
        assert!(ground_truth_for(&set, "shapes_002").unwrap().is_empty());
    }

    #[test]
    fn missing_image_is_an_error() {
        let set = parse_ground_truth(DATASET).unwrap();
        let err = ground_truth_for(&set, "shapes_999").unwrap_err();
        assert!(matches!(err, EvalError::MissingImage { .. }));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            parse_ground_truth("{not json"),
            Err(EvalError::Json(_))
        ));
    }
}
