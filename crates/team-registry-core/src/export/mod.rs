//! Report export for accepted team records.
//!
//! Records are written as CSV and/or JSON files named
//! `{stem}_{timestamp}.{ext}` in an output directory. Each format is
//! written independently, so one failing format does not prevent the
//! other from being written.

mod csv;
mod error;
mod json;

pub use self::csv::{CSV_HEADER, write_records as write_csv_records};
pub use error::ExportError;

use crate::parse::TeamRecord;
use chrono::Local;
use log::{info, warn};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Format of the timestamp appended to report file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// A report file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-separated values.
    Csv,
    /// A JSON array of records.
    Json,
}

impl ExportFormat {
    /// Every supported format.
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Csv, ExportFormat::Json];

    /// File extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Error returned when parsing an unknown format name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown export format '{0}' (expected 'csv' or 'json')")]
pub struct UnknownFormat(pub String);

impl FromStr for ExportFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// Where report files are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    /// Output directory, created if missing.
    pub directory: PathBuf,
    /// File name stem, e.g. `team_info`.
    pub file_stem: String,
    /// Suffix appended to the stem, if any.
    pub timestamp: Option<String>,
}

impl ExportTarget {
    /// Creates a target without a timestamp suffix.
    pub fn new(directory: impl Into<PathBuf>, file_stem: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_stem: file_stem.into(),
            timestamp: None,
        }
    }

    /// Creates a target suffixed with the current local time.
    pub fn timestamped(directory: impl Into<PathBuf>, file_stem: impl Into<String>) -> Self {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        Self::new(directory, file_stem).with_timestamp(timestamp)
    }

    /// Sets the timestamp suffix.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Returns the file path for a format.
    pub fn path_for(&self, format: ExportFormat) -> PathBuf {
        let file_name = match &self.timestamp {
            Some(timestamp) => format!("{}_{}.{}", self.file_stem, timestamp, format.extension()),
            None => format!("{}.{}", self.file_stem, format.extension()),
        };
        self.directory.join(file_name)
    }
}

/// The outcome of writing each requested format.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// One entry per requested format, in request order.
    pub outputs: Vec<(ExportFormat, Result<PathBuf, ExportError>)>,
}

impl ExportReport {
    /// Returns true if every format was written.
    pub fn is_ok(&self) -> bool {
        self.outputs.iter().all(|(_, result)| result.is_ok())
    }

    /// Paths of the files that were written.
    pub fn written(&self) -> impl Iterator<Item = (ExportFormat, &Path)> {
        self.outputs
            .iter()
            .filter_map(|(format, result)| result.as_ref().ok().map(|p| (*format, p.as_path())))
    }

    /// Formats that failed, with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (ExportFormat, &ExportError)> {
        self.outputs
            .iter()
            .filter_map(|(format, result)| result.as_ref().err().map(|e| (*format, e)))
    }
}

/// Writes `records` in each requested format.
///
/// Repeated formats are written once. Existing files are overwritten.
pub fn export(records: &[TeamRecord], target: &ExportTarget, formats: &[ExportFormat]) -> ExportReport {
    let mut report = ExportReport::default();

    for &format in formats {
        if report.outputs.iter().any(|(done, _)| *done == format) {
            continue;
        }

        let path = target.path_for(format);
        let result = write_format(format, &target.directory, &path, records).map(|()| path);
        match &result {
            Ok(path) => info!(
                "Wrote {} records to {} report {}",
                records.len(),
                format,
                path.display()
            ),
            Err(e) => warn!("{}", e),
        }
        report.outputs.push((format, result));
    }

    report
}

fn write_format(
    format: ExportFormat,
    directory: &Path,
    path: &Path,
    records: &[TeamRecord],
) -> Result<(), ExportError> {
    fs::create_dir_all(directory).map_err(|source| ExportError::Io {
        path: directory.to_path_buf(),
        source,
    })?;

    match format {
        ExportFormat::Csv => csv::write_csv(path, records),
        ExportFormat::Json => json::write_json(path, records),
    }
}
