//! Export module for RegionSnap
//!
//! Provides image encoding and numbered capture files.

mod png;
mod store;

pub use png::PngEncoder;
pub use store::DirectoryStore;

use image::RgbaImage;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Nothing to encode")]
    EmptyImage,
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Prefix shared by every capture file
pub const CAPTURE_FILE_PREFIX: &str = "capture_";

/// Image codec for captured frames
pub trait FrameEncoder {
    /// File extension matching the encoded format, without the dot
    fn extension(&self) -> &'static str;

    fn encode(&self, image: &RgbaImage) -> ExportResult<Vec<u8>>;
}

/// Destination for encoded captures
pub trait CaptureStore {
    /// Create (or truncate) `file_name` and write `bytes`; returns the absolute path
    fn write(&self, file_name: &str, bytes: &[u8]) -> ExportResult<PathBuf>;
}

/// File name for the capture with the given sequence number, e.g. `capture_007.png`
pub fn capture_file_name(index: u32, extension: &str) -> String {
    format!("{}{:03}.{}", CAPTURE_FILE_PREFIX, index, extension)
}
