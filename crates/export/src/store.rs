//! Capture files on disk

use crate::{CaptureStore, ExportResult};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes captures into a single directory
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    dir: PathBuf,
}

impl DirectoryStore {
    /// Store rooted at `dir`; relative paths are resolved against the current directory
    pub fn new(dir: impl AsRef<Path>) -> ExportResult<Self> {
        let dir = std::path::absolute(dir.as_ref())?;
        Ok(Self { dir })
    }

    /// Store rooted at the process's current working directory
    pub fn current_dir() -> ExportResult<Self> {
        Ok(Self {
            dir: std::env::current_dir()?,
        })
    }
}

impl CaptureStore for DirectoryStore {
    fn write(&self, file_name: &str, bytes: &[u8]) -> ExportResult<PathBuf> {
        let path = self.dir.join(file_name);

        let mut file = File::create(&path)?;
        file.write_all(bytes)?;
        file.flush()?;

        debug!(path = %path.display(), len = bytes.len(), "capture written");
        Ok(path)
    }
}
