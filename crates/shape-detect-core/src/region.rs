//! Connected-component segmentation over a binary mask.

use serde::{Deserialize, Serialize};

use crate::BinaryMask;

/// One connected foreground component, as flat row-major pixel indices in
/// discovery order. Transient: produced by [`segment_mask`], consumed by
/// feature extraction and dropped.
#[derive(Clone, Debug)]
pub struct Region {
    pub pixels: Vec<u32>,
}

impl Region {
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Iterate pixel coordinates in discovery order.
    pub fn coords<'a>(&'a self, width: usize) -> impl Iterator<Item = (u32, u32)> + 'a {
        let w = width as u32;
        self.pixels.iter().map(move |&idx| (idx % w, idx / w))
    }
}

/// Segmentation settings.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SegmenterParams {
    /// Components smaller than this many pixels are dropped before feature
    /// extraction (cheap early noise rejection).
    pub min_region_pixels: usize,
}

impl Default for SegmenterParams {
    fn default() -> Self {
        Self {
            min_region_pixels: 40,
        }
    }
}

const NEIGHBORS_8: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Flood-fill connected-component labeling with 8-neighbor adjacency.
///
/// Pixels are scanned in row-major order; each unvisited foreground pixel
/// seeds a component which is expanded with a LIFO frontier. Every pixel is
/// visited exactly once, so the seed (first pixel) of each region is a pure
/// function of the mask.
pub fn segment_mask(mask: &BinaryMask, params: &SegmenterParams) -> Vec<Region> {
    let (w, h) = (mask.width, mask.height);
    let mut visited = vec![false; w * h];
    let mut regions = Vec::new();
    let mut dropped = 0usize;

    for y in 0..h {
        for x in 0..w {
            let seed = y * w + x;
            if visited[seed] || !mask.get(seed) {
                continue;
            }

            let mut pixels = Vec::new();
            let mut frontier = vec![seed as u32];
            visited[seed] = true;

            while let Some(idx) = frontier.pop() {
                pixels.push(idx);
                let (cx, cy) = ((idx as usize % w) as i64, (idx as usize / w) as i64);
                for (dx, dy) in NEIGHBORS_8 {
                    let (nx, ny) = (cx + dx, cy + dy);
                    if !mask.is_foreground(nx, ny) {
                        continue;
                    }
                    let nidx = ny as usize * w + nx as usize;
                    if !visited[nidx] {
                        visited[nidx] = true;
                        frontier.push(nidx as u32);
                    }
                }
            }

            if pixels.len() >= params.min_region_pixels {
                regions.push(Region { pixels });
            } else {
                dropped += 1;
            }
        }
    }

    log::debug!(
        "segmentation: {} region(s) kept, {} below {} px",
        regions.len(),
        dropped,
        params.min_region_pixels
    );
    regions
}
