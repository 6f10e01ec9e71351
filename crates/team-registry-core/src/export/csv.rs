//! CSV report writer.

use super::error::ExportError;
use crate::parse::TeamRecord;
use chrono::SecondsFormat;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Column names of the CSV report.
pub const CSV_HEADER: [&str; 5] = ["team_name", "members", "team_reference", "author", "timestamp"];

/// Writes records as CSV rows to any writer.
pub fn write_records<W: Write>(writer: W, records: &[TeamRecord]) -> Result<(), ::csv::Error> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for record in records {
        csv_writer.write_record([
            record.team_name.as_str(),
            record.members_summary().as_str(),
            record.team_reference.as_str(),
            record.author.as_str(),
            record
                .timestamp
                .to_rfc3339_opts(SecondsFormat::AutoSi, true)
                .as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes the CSV report to `path`, replacing any existing file.
pub(super) fn write_csv(path: &Path, records: &[TeamRecord]) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_to(path, file, records)
}

/// Writes the CSV report to `writer`, attributing failures to `path`.
fn write_to<W: Write>(path: &Path, writer: W, records: &[TeamRecord]) -> Result<(), ExportError> {
    write_records(writer, records).map_err(|source| csv_failure(path, source))
}

/// Reports I/O failures inside the CSV writer as [`ExportError::Io`].
fn csv_failure(path: &Path, source: ::csv::Error) -> ExportError {
    if !source.is_io_error() {
        return ExportError::Csv {
            path: path.to_path_buf(),
            source,
        };
    }

    let source = match source.into_kind() {
        ::csv::ErrorKind::Io(source) => source,
        kind => io::Error::other(format!("{:?}", kind)),
    };
    ExportError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::IssueComment;
    use crate::parse::{Member, Registration};
    use chrono::{DateTime, Utc};

    fn tricky_record() -> TeamRecord {
        let registration = Registration {
            team_name: "Alpha, \"the first\"".to_string(),
            members: vec![Member::new("张三", "zhangsan"), Member::new("Li, Si", "lisi")],
            team_reference: "github.com/alpha-team".to_string(),
            team_repository: None,
            declared_submission_time: None,
        };
        let created_at = DateTime::<Utc>::from_timestamp(1_736_928_000, 0).unwrap();
        let comment = IssueComment::new(5, "zhangsan", created_at, "");
        TeamRecord::from_registration(registration, &comment)
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_io_error() {
        let path = Path::new("data/team_info.csv");
        let err = write_to(path, BrokenPipe, &[tricky_record()]).unwrap_err();
        match err {
            ExportError::Io { path: failed, source } => {
                assert_eq!(failed.as_path(), path);
                assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
            }
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn header_only_for_no_records() {
        let mut out = Vec::new();
        write_records(&mut out, &[]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "team_name,members,team_reference,author,timestamp\n"
        );
    }

    #[test]
    fn round_trips_through_reader() {
        let record = tricky_record();
        let mut out = Vec::new();
        write_records(&mut out, std::slice::from_ref(&record)).unwrap();

        let mut reader = ::csv::Reader::from_reader(out.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), CSV_HEADER.to_vec());

        let rows: Vec<::csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(&row[0], "Alpha, \"the first\"");
        assert_eq!(&row[1], "张三 (zhangsan); Li, Si (lisi)");
        assert_eq!(&row[2], "github.com/alpha-team");
        assert_eq!(&row[3], "zhangsan");
        assert_eq!(&row[4], "2025-01-15T08:00:00Z");
    }
}
