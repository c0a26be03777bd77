use crate::CoreError;

/// Borrowed view over a row-major RGBA pixel buffer (4 bytes per pixel).
#[derive(Clone, Copy, Debug)]
pub struct RgbaImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major RGBA, len = w*h*4
}

/// Borrowed view over a row-major single-channel buffer.
#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

impl<'a> RgbaImageView<'a> {
    /// Wrap a raw RGBA buffer, validating dimensions and length.
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::EmptyImage { width, height });
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(CoreError::EmptyImage { width, height })?;
        if data.len() != expected {
            return Err(CoreError::InvalidBufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Per-pixel luminance plane (ITU-R BT.601 weights).
    pub fn luminance(&self) -> Vec<f32> {
        self.data
            .chunks_exact(4)
            .map(|px| 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32)
            .collect()
    }
}

impl<'a> GrayImageView<'a> {
    /// Wrap a raw grayscale buffer, validating dimensions and length.
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::EmptyImage { width, height });
        }
        let expected = width
            .checked_mul(height)
            .ok_or(CoreError::EmptyImage { width, height })?;
        if data.len() != expected {
            return Err(CoreError::InvalidBufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Luminance plane; grayscale samples pass through unchanged.
    pub fn luminance(&self) -> Vec<f32> {
        self.data.iter().map(|&v| v as f32).collect()
    }
}
