//! PNG encoding

use crate::{ExportError, ExportResult, FrameEncoder};
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

/// Lossless PNG codec
#[derive(Debug, Default, Clone, Copy)]
pub struct PngEncoder;

impl PngEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl FrameEncoder for PngEncoder {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn encode(&self, image: &RgbaImage) -> ExportResult<Vec<u8>> {
        if image.width() == 0 || image.height() == 0 {
            return Err(ExportError::EmptyImage);
        }

        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}
