//! JSON report writer.

use super::error::ExportError;
use crate::parse::TeamRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the JSON report to `path`, replacing any existing file.
///
/// The report is a pretty-printed array of record objects. Non-ASCII text
/// is written as UTF-8, not escaped.
pub(super) fn write_json(path: &Path, records: &[TeamRecord]) -> Result<(), ExportError> {
    let io_error = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records).map_err(|source| ExportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.write_all(b"\n").map_err(io_error)?;
    writer.flush().map_err(io_error)
}
