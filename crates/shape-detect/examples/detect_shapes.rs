use std::{env, path::PathBuf};

use image::ImageReader;
use log::{info, LevelFilter};
use shape_detect::detect;
use shape_detect::core::init_with_level;
use shape_detect::DetectorParams;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_with_level(LevelFilter::Info)?;

    let image_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("testdata/shapes.png"));

    let img = ImageReader::open(&image_path)?.decode()?;
    let result = detect::detect_image(&img, DetectorParams::default())?;

    info!(
        "{}: {} shape(s) in {:.2} ms",
        image_path.display(),
        result.shapes.len(),
        result.processing_time_ms
    );

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
