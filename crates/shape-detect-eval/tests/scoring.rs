//! End-to-end scoring scenarios.

use approx::assert_relative_eq;
use shape_detect::{DetectedShape, DetectionResult, ShapeKind};
use shape_detect_core::BoundingBox;
use shape_detect_eval::{
    evaluate, evaluate_image, failed_image, parse_ground_truth, score_batch, Grade,
    GroundTruthShape, MatchParams, PASS_SCORE,
};

fn shape(kind: ShapeKind, bbox: BoundingBox, confidence: f32) -> DetectedShape {
    DetectedShape {
        kind,
        confidence,
        bounding_box: bbox,
        center: bbox.center(),
        area: bbox.area() as usize,
    }
}

fn detection_of(shapes: Vec<DetectedShape>, time_ms: f64) -> DetectionResult {
    DetectionResult {
        shapes,
        processing_time_ms: time_ms,
        image_width: 400,
        image_height: 400,
    }
}

#[test]
fn all_missed_annotations_zero_the_image() {
    let det = detection_of(vec![], 10.0);
    let gt = vec![GroundTruthShape::boxed(
        ShapeKind::Circle,
        BoundingBox::new(0, 0, 10, 10),
    )];

    let m = evaluate(&det, &gt, &MatchParams::default());
    assert_eq!(m.precision, 0.0);
    assert_eq!(m.recall, 0.0);
    assert_eq!(m.f1, 0.0);

    let e = evaluate_image("img", &det, &gt, &MatchParams::default());
    assert!(!e.passed, "score {} should fail", e.score);
}

#[test]
fn identical_detection_and_annotation_grade_an_a() {
    let b = BoundingBox::new(40, 40, 100, 100);
    let det = detection_of(vec![shape(ShapeKind::Circle, b, 0.92)], 25.0);
    let mut gt = GroundTruthShape::boxed(ShapeKind::Circle, b);
    gt.area = Some(b.area() as usize);
    gt.expected_confidence = Some(0.92);

    let e = evaluate_image("perfect", &det, &[gt], &MatchParams::default());
    assert_relative_eq!(e.metrics.precision, 1.0);
    assert_relative_eq!(e.metrics.recall, 1.0);
    assert_relative_eq!(e.metrics.f1, 1.0);
    assert_relative_eq!(e.metrics.average_iou, 1.0, epsilon = 1e-6);
    assert_relative_eq!(e.score, 100.0);
    assert!(e.passed);

    let overall = score_batch(vec![e]);
    assert_relative_eq!(overall.percentage, 100.0);
    assert_eq!(overall.grade, Grade::A);
}

#[test]
fn one_broken_image_does_not_abort_the_batch() {
    let b = BoundingBox::new(40, 40, 100, 100);
    let det = detection_of(vec![shape(ShapeKind::Rectangle, b, 0.8)], 30.0);
    let mut gt = GroundTruthShape::boxed(ShapeKind::Rectangle, b);
    gt.area = Some(b.area() as usize);

    let good = evaluate_image("good", &det, &[gt], &MatchParams::default());
    let broken = failed_image("broken", "source image unreadable");

    let overall = score_batch(vec![good, broken]);
    assert_eq!(overall.images.len(), 2);
    assert_eq!(overall.passed_images, 1);
    assert_relative_eq!(overall.percentage, 50.0);
    assert_eq!(overall.grade, Grade::F);
    assert!(overall.images[1].feedback.contains("unreadable"));
}

#[test]
fn detections_of_the_wrong_kind_earn_nothing() {
    let b = BoundingBox::new(0, 0, 60, 60);
    let det = detection_of(vec![shape(ShapeKind::Pentagon, b, 0.85)], 10.0);
    let gt = vec![GroundTruthShape::boxed(ShapeKind::Star, b)];

    let m = evaluate(&det, &gt, &MatchParams::default());
    assert_eq!(m.precision, 0.0);
    assert_eq!(m.recall, 0.0);
}

#[test]
fn dataset_driven_evaluation_flow() {
    let dataset = parse_ground_truth(
        r#"{
            "img_a": [
                {"type": "circle",
                 "bounding_box": {"x": 10, "y": 10, "width": 80, "height": 80},
                 "area": 6400}
            ]
        }"#,
    )
    .unwrap();

    let gt = shape_detect_eval::ground_truth_for(&dataset, "img_a").unwrap();
    let b = BoundingBox::new(10, 10, 80, 80);
    let mut detected = shape(ShapeKind::Circle, b, 0.9);
    detected.area = 6400;
    let det = detection_of(vec![detected], 12.0);

    let e = evaluate_image("img_a", &det, gt, &MatchParams::default());
    assert!(e.passed);
    assert!(e.score >= PASS_SCORE);

    let missing = shape_detect_eval::ground_truth_for(&dataset, "img_b");
    let folded = match missing {
        Ok(gt) => evaluate_image("img_b", &det, gt, &MatchParams::default()),
        Err(err) => failed_image("img_b", err),
    };
    assert!(!folded.passed);
    assert_eq!(folded.score, 0.0);
}
