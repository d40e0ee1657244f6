//! JSONL export
//!
//! An [`ExportArtifact`] is the downloadable file: name, MIME type and
//! body. Writing it to disk is separate so callers can preview first.

use crate::assembler::Dataset;
use crate::config::DatasetConfig;
use crate::digest::DatasetDigest;
use crate::error::DatasetError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tuneset_model::Section;

/// An export ready to be written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportArtifact {
    /// Suggested file name
    pub filename: String,
    /// MIME type
    pub mime: String,
    /// Newline-joined JSONL, no trailing newline
    #[serde(skip)]
    pub body: String,
    /// Digest of `body`
    pub digest: DatasetDigest,
    /// Number of lines in `body`
    pub line_count: usize,
}

impl ExportArtifact {
    /// Wrap an assembled dataset
    #[must_use]
    pub fn from_dataset(dataset: &Dataset, config: &DatasetConfig) -> Self {
        Self {
            filename: config.filename.clone(),
            mime: config.mime.clone(),
            body: dataset.to_jsonl(),
            digest: dataset.digest(),
            line_count: dataset.len(),
        }
    }

    /// Write the body to `target`
    ///
    /// A directory target receives the artifact under its own file name.
    ///
    /// # Errors
    /// Returns [`DatasetError::Io`] if the file cannot be written
    pub fn write_to(&self, target: impl AsRef<Path>) -> Result<PathBuf, DatasetError> {
        let target = target.as_ref();
        let path = if target.is_dir() {
            target.join(&self.filename)
        } else {
            target.to_path_buf()
        };
        fs::write(&path, self.body.as_bytes()).map_err(|e| DatasetError::io_error(&path, e))?;

        tracing::info!(
            path = %path.display(),
            lines = self.line_count,
            digest = %self.digest.short(),
            "wrote dataset export"
        );
        Ok(path)
    }
}

/// Assemble and package the export for `sections`
///
/// # Errors
/// Returns error if a record fails to serialize
pub fn export_jsonl(sections: &[Section], config: &DatasetConfig) -> Result<ExportArtifact, DatasetError> {
    let dataset = Dataset::assemble(sections, config)?;
    Ok(ExportArtifact::from_dataset(&dataset, config))
}

/// Assemble the export and write it to `target`
///
/// # Errors
/// Returns error if assembly or the write fails
pub fn write_export(
    sections: &[Section],
    config: &DatasetConfig,
    target: impl AsRef<Path>,
) -> Result<PathBuf, DatasetError> {
    export_jsonl(sections, config)?.write_to(target)
}
