use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Tight box over a set of pixel coordinates. Returns `None` for an
    /// empty set.
    pub fn from_pixels(coords: impl IntoIterator<Item = (u32, u32)>) -> Option<Self> {
        let mut it = coords.into_iter();
        let (x0, y0) = it.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (x0, y0, x0, y0);
        for (x, y) in it {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Some(Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        })
    }

    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    #[inline]
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Box midpoint (not the pixel centroid of the underlying region).
    pub fn center(&self) -> Point2<f32> {
        Point2::new(
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }

    /// Intersection over union with another box, in [0, 1].
    pub fn iou(&self, other: &BoundingBox) -> f32 {
        let x_left = self.x.max(other.x);
        let y_top = self.y.max(other.y);
        let x_right = self.right().min(other.right());
        let y_bottom = self.bottom().min(other.bottom());

        if x_right <= x_left || y_bottom <= y_top {
            return 0.0;
        }

        let intersection = (x_right - x_left) as f64 * (y_bottom - y_top) as f64;
        let union = self.area() as f64 + other.area() as f64 - intersection;
        if union <= 0.0 {
            return 0.0;
        }
        (intersection / union) as f32
    }
}
