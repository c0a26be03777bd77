//! Per-region geometric descriptors.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use shape_detect_core::{BinaryMask, BoundingBox, Region};

const EPS: f32 = 1e-6;

/// Number of boundary samples the corner estimator aims for.
const CORNER_SAMPLE_TARGET: usize = 20;

/// Corner angle window, strict on both ends.
const CORNER_MIN_DEG: f32 = 45.0;
const CORNER_MAX_DEG: f32 = 135.0;

/// Geometric descriptors of one region.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ShapeFeatures {
    /// Region pixel count.
    pub area: usize,
    pub bounding_box: BoundingBox,
    /// Bounding-box midpoint.
    pub center: Point2<f32>,
    /// Count of region pixels with at least one 8-neighbor outside the
    /// region (or outside the image).
    pub perimeter: usize,
    /// Isoperimetric ratio `4πA / P²`: 1.0 for a perfect disc.
    pub circularity: f32,
    /// Approximate polygon vertex count from strided boundary sampling.
    pub corner_count: usize,
    /// `area / bbox area`.
    pub fill_ratio: f32,
    /// `max(w,h) / min(w,h)`, at least 1.
    pub aspect_ratio: f32,
    /// `perimeter / (area + 1)`; high for skeletal/noisy regions.
    pub thinness: f32,
}

/// Compute descriptors for one region. Returns `None` for an empty region
/// (segmentation never emits one).
///
/// The mask is the image-wide foreground mask the region was segmented
/// from. Under 8-connectivity any 8-adjacent foreground pixel belongs to
/// the same component, so boundary tests may consult the mask directly.
pub fn extract_features(region: &Region, mask: &BinaryMask) -> Option<ShapeFeatures> {
    let width = mask.width;
    let bounding_box = BoundingBox::from_pixels(region.coords(width))?;

    let boundary = ordered_boundary(region, mask, &bounding_box);
    let area = region.len();
    let perimeter = boundary.len();

    let circularity =
        4.0 * std::f32::consts::PI * area as f32 / (perimeter as f32 * perimeter as f32 + EPS);
    let corner_count = count_corners(&boundary);

    let (w, h) = (bounding_box.width, bounding_box.height);
    let fill_ratio = area as f32 / (bounding_box.area() as f32 + EPS);
    let aspect_ratio = w.max(h) as f32 / w.min(h).max(1) as f32;
    let thinness = perimeter as f32 / (area as f32 + 1.0);

    Some(ShapeFeatures {
        area,
        bounding_box,
        center: bounding_box.center(),
        perimeter,
        circularity,
        corner_count,
        fill_ratio,
        aspect_ratio,
        thinness,
    })
}

/// Region pixels on the component boundary, ordered along the contour.
///
/// Flood-fill discovery order scatters boundary pixels, which would turn
/// the downstream turn-angle estimate into noise. Sorting by polar angle
/// about the box midpoint recovers contour order for the star-convex
/// shapes this detector targets.
fn ordered_boundary(region: &Region, mask: &BinaryMask, bbox: &BoundingBox) -> Vec<(u32, u32)> {
    let mut boundary: Vec<(u32, u32)> = region
        .coords(mask.width)
        .filter(|&(x, y)| {
            let (x, y) = (x as i64, y as i64);
            for dy in -1..=1i64 {
                for dx in -1..=1i64 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    if !mask.is_foreground(x + dx, y + dy) {
                        return true;
                    }
                }
            }
            false
        })
        .collect();

    let c = bbox.center();
    boundary.sort_by(|&(ax, ay), &(bx, by)| {
        let a = (ay as f32 - c.y).atan2(ax as f32 - c.x);
        let b = (by as f32 - c.y).atan2(bx as f32 - c.x);
        a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal)
    });
    boundary
}

/// Estimate the vertex count from the boundary.
///
/// The boundary is subsampled at a stride of `len / 20 + 1` so roughly 20
/// samples survive regardless of region size. For each sample and its next
/// two (wrapping), the turn angle between consecutive edge vectors counts
/// as a corner when it falls strictly inside (45°, 135°).
fn count_corners(boundary: &[(u32, u32)]) -> usize {
    let stride = boundary.len() / CORNER_SAMPLE_TARGET + 1;
    let samples: Vec<Point2<f32>> = boundary
        .iter()
        .step_by(stride)
        .map(|&(x, y)| Point2::new(x as f32, y as f32))
        .collect();

    let n = samples.len();
    if n < 3 {
        return 0;
    }

    let mut corners = 0;
    for k in 0..n {
        let p1 = samples[k];
        let p2 = samples[(k + 1) % n];
        let p3 = samples[(k + 2) % n];

        let v1 = p2 - p1;
        let v2 = p3 - p2;
        let mags = v1.norm() * v2.norm();
        if mags <= EPS {
            continue;
        }

        let cos = (v1.dot(&v2) / mags).clamp(-1.0, 1.0);
        let angle = cos.acos().to_degrees();
        if angle > CORNER_MIN_DEG && angle < CORNER_MAX_DEG {
            corners += 1;
        }
    }
    corners
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use shape_detect_core::{segment_mask, BinaryMask, SegmenterParams};

    /// Rasterize a predicate into a mask and return its sole region.
    fn single_region(
        width: usize,
        height: usize,
        fg: impl Fn(i64, i64) -> bool,
    ) -> (Region, BinaryMask) {
        let mut bits = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                bits.push(fg(x as i64, y as i64));
            }
        }
        let mask = BinaryMask::from_bits(width, height, bits);
        let mut regions = segment_mask(
            &mask,
            &SegmenterParams {
                min_region_pixels: 1,
            },
        );
        assert_eq!(regions.len(), 1, "expected exactly one region");
        (regions.remove(0), mask)
    }

    fn disc(radius: i64) -> (Region, BinaryMask) {
        let size = (2 * radius + 10) as usize;
        let c = (radius + 5) as i64;
        single_region(size, size, |x, y| {
            let (dx, dy) = (x - c, y - c);
            dx * dx + dy * dy <= radius * radius
        })
    }

    fn filled_rect(w: i64, h: i64) -> (Region, BinaryMask) {
        single_region((w + 8) as usize, (h + 8) as usize, |x, y| {
            x >= 4 && x < 4 + w && y >= 4 && y < 4 + h
        })
    }

    #[test]
    fn disc_has_high_circularity() {
        let (region, mask) = disc(25);
        let f = extract_features(&region, &mask).unwrap();
        assert!(
            f.circularity > 0.75,
            "disc circularity {} should exceed 0.75",
            f.circularity
        );
        assert_relative_eq!(f.aspect_ratio, 1.0, epsilon = 0.05);
    }

    #[test]
    fn square_fills_its_bounding_box() {
        let (region, mask) = filled_rect(50, 50);
        let f = extract_features(&region, &mask).unwrap();
        assert_eq!(f.area, 2500);
        assert_eq!(f.bounding_box.width, 50);
        assert_eq!(f.bounding_box.height, 50);
        assert!(f.fill_ratio > 0.99);
        assert_relative_eq!(f.aspect_ratio, 1.0);
    }

    #[test]
    fn elongated_bar_has_high_aspect_ratio() {
        let (region, mask) = filled_rect(60, 10);
        let f = extract_features(&region, &mask).unwrap();
        assert_relative_eq!(f.aspect_ratio, 6.0);
    }

    #[test]
    fn perimeter_counts_boundary_pixels_only() {
        // 3x3 block: every pixel except the middle touches background.
        let (region, mask) = filled_rect(3, 3);
        let f = extract_features(&region, &mask).unwrap();
        assert_eq!(f.area, 9);
        assert_eq!(f.perimeter, 8);
    }

    #[test]
    fn center_is_bounding_box_midpoint() {
        let (region, mask) = filled_rect(10, 20);
        let f = extract_features(&region, &mask).unwrap();
        assert_relative_eq!(f.center.x, 4.0 + 5.0);
        assert_relative_eq!(f.center.y, 4.0 + 10.0);
    }

    #[test]
    fn tiny_region_near_floor_yields_finite_features() {
        // 40 pixels in a 5x8 block, the segmentation floor. The boundary is
        // shorter than the sample target; every boundary pixel is sampled.
        let (region, mask) = filled_rect(5, 8);
        let f = extract_features(&region, &mask).unwrap();
        assert_eq!(f.area, 40);
        assert!(f.circularity.is_finite());
        assert!(f.thinness.is_finite());
        assert!(f.corner_count < f.perimeter);
    }

    #[test]
    fn thinness_flags_skeletal_regions() {
        let (region, mask) = filled_rect(30, 1);
        let f = extract_features(&region, &mask).unwrap();
        assert!(f.thinness > 0.5, "1px line thinness {} too low", f.thinness);
    }
}
