//! Captured frame buffer

use crate::{CaptureError, CaptureResult};
use image::{ImageBuffer, RgbaImage};

/// Top-down 32-bit BGRA pixels as returned by GDI
#[derive(Debug, Clone)]
pub struct FrameData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl FrameData {
    /// Wrap a BGRA buffer, checking it matches the frame size
    pub fn from_bgra(data: Vec<u8>, width: u32, height: u32) -> CaptureResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(CaptureError::BufferSize {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self { data, width, height })
    }

    /// Convert BGRA data to an opaque RGBA image
    pub fn to_rgba_image(&self) -> CaptureResult<RgbaImage> {
        let mut rgba_data = self.data.clone();

        // GDI leaves the alpha byte undefined (usually zero)
        for chunk in rgba_data.chunks_exact_mut(4) {
            chunk.swap(0, 2);
            chunk[3] = 0xFF;
        }

        let actual = rgba_data.len();
        ImageBuffer::from_raw(self.width, self.height, rgba_data).ok_or(CaptureError::BufferSize {
            expected: self.width as usize * self.height as usize * 4,
            actual,
        })
    }
}
