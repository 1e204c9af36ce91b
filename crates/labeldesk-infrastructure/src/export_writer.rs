//! Delivery of export strings to files.

use labeldesk_core::{ExportFormat, Result};
use std::path::{Path, PathBuf};

/// Writes export content under a fixed directory using the conventional
/// file name of each format.
#[derive(Debug, Clone)]
pub struct ExportWriter {
    dir: PathBuf,
}

impl ExportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `content` and returns the file path. Existing files are replaced.
    pub fn write(&self, format: ExportFormat, content: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format.file_name());
        std::fs::write(&path, content)?;
        tracing::info!(path = %path.display(), bytes = content.len(), "export written");
        Ok(path)
    }
}
