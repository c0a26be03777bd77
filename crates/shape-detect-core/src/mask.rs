//! Global-mean binarization.
//!
//! A single global threshold is used on purpose: the inputs this pipeline
//! targets are synthetic or high-contrast rasters where one threshold
//! separates shapes from background. Images with strong local contrast
//! variance are out of scope.

use serde::{Deserialize, Serialize};

use crate::{GrayImageView, RgbaImageView};

/// Which luminance class was taken as foreground.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaskPolarity {
    /// Shapes are brighter than the background.
    LightOnDark,
    /// Shapes are darker than the background.
    DarkOnLight,
}

/// Foreground/background mask derived from one image.
#[derive(Clone, Debug)]
pub struct BinaryMask {
    pub width: usize,
    pub height: usize,
    data: Vec<bool>,
}

impl BinaryMask {
    /// Build a mask from explicit foreground flags (row-major, len = w*h).
    pub fn from_bits(width: usize, height: usize, data: Vec<bool>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    /// Foreground test with out-of-bounds coordinates mapping to background.
    #[inline]
    pub fn is_foreground(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }
        self.data[y as usize * self.width + x as usize]
    }

    /// Foreground test by flat row-major index.
    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        self.data[idx]
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&f| f).count()
    }
}

/// Threshold a luminance plane against its global mean.
///
/// Pixels strictly below the mean form the "dark" class, the rest the
/// "light" class; the minority class becomes foreground. On a uniform
/// image the dark class is empty, so the mask comes out all-background.
pub fn binarize_plane(width: usize, height: usize, luma: &[f32]) -> (BinaryMask, MaskPolarity) {
    debug_assert_eq!(luma.len(), width * height);

    let avg = luma.iter().sum::<f32>() / luma.len() as f32;
    let dark = luma.iter().filter(|&&v| v < avg).count();
    let light = luma.len() - dark;

    let polarity = if light < dark {
        MaskPolarity::LightOnDark
    } else {
        MaskPolarity::DarkOnLight
    };

    let data = match polarity {
        MaskPolarity::LightOnDark => luma.iter().map(|&v| v >= avg).collect(),
        MaskPolarity::DarkOnLight => luma.iter().map(|&v| v < avg).collect(),
    };

    let mask = BinaryMask {
        width,
        height,
        data,
    };
    log::debug!(
        "binarized {}x{}: polarity {:?}, {} foreground px (mean luma {:.1})",
        width,
        height,
        polarity,
        mask.foreground_count(),
        avg
    );
    (mask, polarity)
}

/// Binarize an RGBA buffer via its luminance plane.
pub fn binarize_rgba(view: &RgbaImageView<'_>) -> (BinaryMask, MaskPolarity) {
    binarize_plane(view.width, view.height, &view.luminance())
}

/// Binarize a single-channel buffer.
pub fn binarize_gray(view: &GrayImageView<'_>) -> (BinaryMask, MaskPolarity) {
    binarize_plane(view.width, view.height, &view.luminance())
}
