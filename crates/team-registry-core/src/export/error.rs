//! Error types for report export.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing a report file.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The output directory or file could not be created or written.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        /// The path being written.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The CSV writer failed.
    #[error("failed to write CSV report {}: {source}", .path.display())]
    Csv {
        /// The path being written.
        path: PathBuf,
        /// The underlying CSV error.
        source: ::csv::Error,
    },

    /// JSON serialization failed.
    #[error("failed to write JSON report {}: {source}", .path.display())]
    Json {
        /// The path being written.
        path: PathBuf,
        /// The underlying serializer error.
        source: serde_json::Error,
    },
}

impl ExportError {
    /// Returns the path that could not be written.
    pub fn path(&self) -> &std::path::Path {
        match self {
            ExportError::Io { path, .. }
            | ExportError::Csv { path, .. }
            | ExportError::Json { path, .. } => path,
        }
    }
}
