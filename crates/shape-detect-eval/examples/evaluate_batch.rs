//! Score a batch of saved detection results against a ground-truth dataset.
//!
//! Usage: `evaluate_batch <detections.json> <ground_truth.json>`
//!
//! `detections.json` maps image ids to serialized `DetectionResult`s, the
//! dataset maps the same ids to annotation arrays.

use std::collections::HashMap;
use std::{env, fs};

use log::LevelFilter;
use shape_detect::DetectionResult;
use shape_detect_core::init_with_level;
use shape_detect_eval::{
    evaluate_image, failed_image, ground_truth_for, load_ground_truth, score_batch, MatchParams,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_with_level(LevelFilter::Info)?;

    let mut args = env::args().skip(1);
    let detections_path = args.next().unwrap_or_else(|| "detections.json".into());
    let dataset_path = args.next().unwrap_or_else(|| "ground_truth.json".into());

    let detections: HashMap<String, DetectionResult> =
        serde_json::from_str(&fs::read_to_string(&detections_path)?)?;
    let dataset = load_ground_truth(&dataset_path)?;

    let params = MatchParams::default();
    let mut images: Vec<_> = detections
        .iter()
        .map(|(image_id, detection)| match ground_truth_for(&dataset, image_id) {
            Ok(gt) => evaluate_image(image_id, detection, gt, &params),
            Err(err) => failed_image(image_id, err),
        })
        .collect();
    images.sort_by(|a, b| a.image_id.cmp(&b.image_id));

    let overall = score_batch(images);
    println!("{}", serde_json::to_string_pretty(&overall)?);
    println!(
        "\n{}/{} passed, {:.1}% — grade {}",
        overall.passed_images,
        overall.images.len(),
        overall.percentage,
        overall.grade
    );
    Ok(())
}
