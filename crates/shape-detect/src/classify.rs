//! Rule-based shape classification.
//!
//! A fixed-priority decision list over weak geometric signals, not a learned
//! model. The thresholds in [`ClassifierParams`] are contract values: two
//! implementations with the same defaults must classify the same pixel input
//! identically.

use serde::{Deserialize, Serialize};

use crate::features::ShapeFeatures;
use crate::types::ShapeKind;

/// Noise gate and rule thresholds.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ClassifierParams {
    /// Regions below this area are treated as noise.
    pub min_area: usize,
    /// Regions filling less of their bounding box than this are noise.
    pub min_fill_ratio: f32,
    /// Regions more elongated than this are noise.
    pub max_aspect_ratio: f32,
    /// Regions with a higher perimeter/area ratio than this are noise.
    pub max_thinness: f32,
    /// Circularity above which a region is a circle.
    pub circle_min_circularity: f32,
    /// Corner count at or below which a region is a triangle.
    pub triangle_max_corners: usize,
    /// Corner count at or below which a region is a pentagon.
    pub pentagon_max_corners: usize,
    /// Width/height ratio below which a many-cornered region may be a star.
    pub star_max_elongation: f32,
    /// Circularity below which a many-cornered region may be a star.
    pub star_max_circularity: f32,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            min_area: 300,
            min_fill_ratio: 0.2,
            max_aspect_ratio: 4.0,
            max_thinness: 0.5,
            circle_min_circularity: 0.75,
            triangle_max_corners: 4,
            pentagon_max_corners: 6,
            star_max_elongation: 1.2,
            star_max_circularity: 0.4,
        }
    }
}

/// A shape label with its confidence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    pub kind: ShapeKind,
    pub confidence: f32,
}

/// One branch of the decision list.
pub(crate) type Rule = fn(&ShapeFeatures, &ClassifierParams) -> Option<Classification>;

/// The decision list, in priority order. The first rule returning `Some`
/// wins; the final rule is total, so a gated region always classifies.
pub(crate) const RULES: [Rule; 4] = [
    circle_rule,
    triangle_rule,
    pentagon_rule,
    star_or_rectangle_rule,
];

/// Classify a region's features, or reject it as noise.
pub fn classify(features: &ShapeFeatures, params: &ClassifierParams) -> Option<Classification> {
    if let Some(reason) = noise_rejection(features, params) {
        log::debug!(
            "region at {:?} rejected: {}",
            features.bounding_box,
            reason
        );
        return None;
    }
    RULES.iter().find_map(|rule| rule(features, params))
}

/// Returns the reason a region is considered noise, if any.
fn noise_rejection(f: &ShapeFeatures, p: &ClassifierParams) -> Option<&'static str> {
    if f.area < p.min_area {
        Some("area below minimum")
    } else if f.fill_ratio < p.min_fill_ratio {
        Some("sparse bounding-box fill")
    } else if f.aspect_ratio > p.max_aspect_ratio {
        Some("excessive elongation")
    } else if f.thinness > p.max_thinness {
        Some("skeletal perimeter/area ratio")
    } else {
        None
    }
}

fn circle_rule(f: &ShapeFeatures, p: &ClassifierParams) -> Option<Classification> {
    (f.circularity > p.circle_min_circularity).then(|| Classification {
        kind: ShapeKind::Circle,
        confidence: f.circularity.min(1.0),
    })
}

fn triangle_rule(f: &ShapeFeatures, p: &ClassifierParams) -> Option<Classification> {
    (f.corner_count <= p.triangle_max_corners).then_some(Classification {
        kind: ShapeKind::Triangle,
        confidence: 0.9,
    })
}

fn pentagon_rule(f: &ShapeFeatures, p: &ClassifierParams) -> Option<Classification> {
    (f.corner_count <= p.pentagon_max_corners).then_some(Classification {
        kind: ShapeKind::Pentagon,
        confidence: 0.85,
    })
}

/// Terminal rule: many-cornered regions are stars when compact and jagged,
/// rectangles otherwise.
fn star_or_rectangle_rule(f: &ShapeFeatures, p: &ClassifierParams) -> Option<Classification> {
    let elongation = f.bounding_box.width as f32 / f.bounding_box.height as f32;
    let kind = if elongation < p.star_max_elongation && f.circularity < p.star_max_circularity {
        ShapeKind::Star
    } else {
        ShapeKind::Rectangle
    };
    Some(Classification {
        kind,
        confidence: 0.8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;
    use shape_detect_core::BoundingBox;

    fn base_features() -> ShapeFeatures {
        ShapeFeatures {
            area: 2500,
            bounding_box: BoundingBox::new(0, 0, 50, 50),
            center: Point2::new(25.0, 25.0),
            perimeter: 200,
            circularity: 0.5,
            corner_count: 8,
            fill_ratio: 1.0,
            aspect_ratio: 1.0,
            thinness: 0.08,
        }
    }

    #[test]
    fn noise_gate_rejects_small_sparse_thin_or_elongated() {
        let p = ClassifierParams::default();

        let mut f = base_features();
        f.area = 299;
        assert!(classify(&f, &p).is_none());

        f = base_features();
        f.fill_ratio = 0.19;
        assert!(classify(&f, &p).is_none());

        f = base_features();
        f.aspect_ratio = 4.1;
        assert!(classify(&f, &p).is_none());

        f = base_features();
        f.thinness = 0.51;
        assert!(classify(&f, &p).is_none());
    }

    #[test]
    fn gate_boundaries_are_inclusive() {
        let p = ClassifierParams::default();
        let mut f = base_features();
        f.area = 300;
        f.fill_ratio = 0.2;
        f.aspect_ratio = 4.0;
        f.thinness = 0.5;
        assert!(classify(&f, &p).is_some());
    }

    #[test]
    fn high_circularity_wins_first() {
        let p = ClassifierParams::default();
        let mut f = base_features();
        f.circularity = 0.9;
        f.corner_count = 3; // would also satisfy the triangle rule
        let c = classify(&f, &p).unwrap();
        assert_eq!(c.kind, ShapeKind::Circle);
        assert!((c.confidence - 0.9).abs() < 1e-6);
    }

    #[test]
    fn circle_confidence_is_clamped_to_one() {
        let p = ClassifierParams::default();
        let mut f = base_features();
        f.circularity = 1.12; // small discrete discs can exceed 1
        let c = classify(&f, &p).unwrap();
        assert_eq!(c.kind, ShapeKind::Circle);
        assert_eq!(c.confidence, 1.0);
    }

    #[test]
    fn few_corners_classify_as_triangle() {
        let p = ClassifierParams::default();
        let mut f = base_features();
        f.corner_count = 4;
        let c = classify(&f, &p).unwrap();
        assert_eq!(c.kind, ShapeKind::Triangle);
        assert!((c.confidence - 0.9).abs() < 1e-6);
    }

    #[test]
    fn five_or_six_corners_classify_as_pentagon() {
        let p = ClassifierParams::default();
        for corners in [5, 6] {
            let mut f = base_features();
            f.corner_count = corners;
            let c = classify(&f, &p).unwrap();
            assert_eq!(c.kind, ShapeKind::Pentagon);
        }
    }

    #[test]
    fn compact_jagged_many_corner_region_is_a_star() {
        let p = ClassifierParams::default();
        let mut f = base_features();
        f.corner_count = 10;
        f.circularity = 0.3;
        let c = classify(&f, &p).unwrap();
        assert_eq!(c.kind, ShapeKind::Star);
    }

    #[test]
    fn many_corner_fallback_is_rectangle() {
        let p = ClassifierParams::default();
        let mut f = base_features();
        f.corner_count = 10;
        f.circularity = 0.6; // too round for a star
        let c = classify(&f, &p).unwrap();
        assert_eq!(c.kind, ShapeKind::Rectangle);

        f.circularity = 0.3;
        f.bounding_box = BoundingBox::new(0, 0, 60, 40); // too wide for a star
        let c = classify(&f, &p).unwrap();
        assert_eq!(c.kind, ShapeKind::Rectangle);
    }

    #[test]
    fn params_round_trip_json() {
        let p = ClassifierParams::default();
        let json = serde_json::to_string(&p).unwrap();
        let back: ClassifierParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back.min_area, p.min_area);
        assert!((back.circle_min_circularity - p.circle_min_circularity).abs() < 1e-6);
    }
}
