//! Output formatting for the CLI.
//!
//! This module provides human-readable and JSON output formatters for the
//! summary of a collection run.

use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use team_registry_core::validate::{Severity, ValidationResult};
use team_registry_core::{
    ExportFormat, ExportReport, RepoId, SkippedComment, TeamRecord, ValidationOutcome, Violation,
};

/// Identifies a record in messages: its source comment and team name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordLabel {
    /// ID of the source comment.
    pub comment_id: u64,
    /// The team name as parsed.
    pub team_name: String,
}

impl From<&TeamRecord> for RecordLabel {
    fn from(record: &TeamRecord) -> Self {
        Self {
            comment_id: record.comment_id,
            team_name: record.team_name.clone(),
        }
    }
}

/// Everything a run produced, ready to be reported.
pub struct RunReport<'a> {
    /// Repository the issue belongs to.
    pub repo: &'a RepoId,
    /// Issue number.
    pub issue: u64,
    /// Number of comments read.
    pub comments: usize,
    /// Comments that did not produce a record.
    pub skipped: &'a [SkippedComment],
    /// Labels of the validated records, indexed like the violations.
    pub labels: &'a [RecordLabel],
    /// Validation outcome.
    pub outcome: &'a ValidationOutcome,
    /// Export results; `None` when nothing was exported.
    pub export: Option<&'a ExportReport>,
}

impl RunReport<'_> {
    fn label_for(&self, violation: &Violation) -> Option<&RecordLabel> {
        self.labels.get(violation.record())
    }

    /// Writes the report in human-readable format.
    pub fn write_human<W: Write>(&self, writer: &mut W, use_colors: bool) -> std::io::Result<()> {
        let mut output = HumanOutput::new(writer, use_colors);

        let attempts: Vec<&SkippedComment> = self
            .skipped
            .iter()
            .filter(|s| s.failure.is_registration_attempt())
            .collect();
        if !attempts.is_empty() {
            output.write_section("incomplete registrations")?;
            for skipped in attempts {
                output.write_skipped(skipped)?;
            }
        }

        if !self.outcome.invalid.is_empty() {
            output.write_section("rejected records")?;
            for result in &self.outcome.invalid {
                output.write_rejected(result)?;
            }
        }

        if !self.outcome.warnings.is_empty() {
            output.write_section("warnings")?;
            for warning in &self.outcome.warnings {
                output.write_violation(warning, self.label_for(warning))?;
            }
        }

        if let Some(report) = self.export {
            output.write_section("reports")?;
            for (format, path) in report.written() {
                output.write_export(format, &path.display().to_string(), true)?;
            }
            for (format, error) in report.failures() {
                output.write_export(format, &error.to_string(), false)?;
            }
        }

        output.write_summary(
            self.comments,
            self.outcome.valid.len(),
            self.accepted_members(),
            self.outcome.invalid.len(),
            self.outcome.warnings.len(),
        )
    }

    /// Total number of members across accepted teams.
    pub fn accepted_members(&self) -> usize {
        self.outcome.valid.iter().map(|r| r.members.len()).sum()
    }

    /// Builds the JSON form of the report.
    pub fn to_json(&self) -> JsonOutput<'_> {
        JsonOutput {
            repo: self.repo.to_string(),
            issue: self.issue,
            comments: self.comments,
            members: self.accepted_members(),
            accepted: &self.outcome.valid,
            rejected: self
                .outcome
                .invalid
                .iter()
                .map(|result| JsonRejected {
                    comment_id: result.record.comment_id,
                    team_name: &result.record.team_name,
                    author: &result.record.author,
                    violations: result.violations.iter().map(JsonIssue::from).collect(),
                })
                .collect(),
            skipped: self
                .skipped
                .iter()
                .filter(|s| s.failure.is_registration_attempt())
                .collect(),
            warnings: self
                .outcome
                .warnings
                .iter()
                .map(|w| JsonIssue::from(w).with_label(self.label_for(w)))
                .collect(),
            exports: self
                .export
                .map(|report| {
                    report
                        .outputs
                        .iter()
                        .map(|(format, result)| match result {
                            Ok(path) => JsonExport {
                                format: *format,
                                path: Some(path.clone()),
                                error: None,
                            },
                            Err(e) => JsonExport {
                                format: *format,
                                path: None,
                                error: Some(e.to_string()),
                            },
                        })
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    /// Writes the report in JSON format.
    pub fn write_json<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&self.to_json()).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}

/// JSON run summary.
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    /// Repository in `owner/name` form.
    pub repo: String,
    /// Issue number.
    pub issue: u64,
    /// Number of comments read.
    pub comments: usize,
    /// Members across accepted teams.
    pub members: usize,
    /// Accepted records.
    pub accepted: &'a [TeamRecord],
    /// Rejected records with their violations.
    pub rejected: Vec<JsonRejected<'a>>,
    /// Comments that attempted a registration but did not parse.
    pub skipped: Vec<&'a SkippedComment>,
    /// Warnings on accepted records.
    pub warnings: Vec<JsonIssue>,
    /// Report files written or failed.
    pub exports: Vec<JsonExport>,
}

/// A rejected record in JSON format.
#[derive(Debug, Serialize)]
pub struct JsonRejected<'a> {
    /// ID of the source comment.
    pub comment_id: u64,
    /// The team name.
    pub team_name: &'a str,
    /// Login of the comment author.
    pub author: &'a str,
    /// Violations found, errors first.
    pub violations: Vec<JsonIssue>,
}

/// A single violation in JSON format.
#[derive(Debug, Serialize)]
pub struct JsonIssue {
    /// Machine-readable code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Severity of the violation.
    pub severity: Severity,
    /// Source comment, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<u64>,
}

impl JsonIssue {
    fn with_label(mut self, label: Option<&RecordLabel>) -> Self {
        self.comment_id = label.map(|l| l.comment_id);
        self
    }
}

impl From<&Violation> for JsonIssue {
    fn from(violation: &Violation) -> Self {
        Self {
            code: violation.code(),
            message: violation.to_string(),
            severity: violation.severity(),
            comment_id: None,
        }
    }
}

/// One export result in JSON format.
#[derive(Debug, Serialize)]
pub struct JsonExport {
    /// The report format.
    pub format: ExportFormat,
    /// Path written, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Failure message, on error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Output formatter for human-readable console output.
pub struct HumanOutput<W: Write> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> HumanOutput<W> {
    /// Creates a new human output formatter.
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors }
    }

    /// Writes a section header.
    pub fn write_section(&mut self, title: &str) -> std::io::Result<()> {
        let header = format!("==> {}", title);
        if self.use_colors {
            writeln!(self.writer, "\n{}", header.cyan().bold())?;
        } else {
            writeln!(self.writer, "\n{}", header)?;
        }
        Ok(())
    }

    fn write_labeled(&mut self, severity: Severity, message: &str) -> std::io::Result<()> {
        let label = match severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN",
        };

        if self.use_colors {
            let colored_label = match severity {
                Severity::Error => format!("[{}]", label).red().bold(),
                Severity::Warning => format!("[{}]", label).yellow().bold(),
            };
            writeln!(self.writer, "  {} {}", colored_label, message)
        } else {
            writeln!(self.writer, "  [{}] {}", label, message)
        }
    }

    /// Writes a comment that looked like a registration but did not parse.
    pub fn write_skipped(&mut self, skipped: &SkippedComment) -> std::io::Result<()> {
        let message = format!(
            "comment {} by @{}: {}",
            skipped.comment_id, skipped.author, skipped.failure
        );
        self.write_labeled(Severity::Warning, &message)
    }

    /// Writes a rejected record and its violations.
    pub fn write_rejected(&mut self, result: &ValidationResult) -> std::io::Result<()> {
        let record = &result.record;
        let heading = format!(
            "'{}' (comment {} by @{})",
            record.team_name, record.comment_id, record.author
        );
        if self.use_colors {
            writeln!(self.writer, "  {}", heading.bold())?;
        } else {
            writeln!(self.writer, "  {}", heading)?;
        }
        for violation in &result.violations {
            self.write_labeled(violation.severity(), &format!("  {}", violation))?;
        }
        Ok(())
    }

    /// Writes a single violation.
    pub fn write_violation(
        &mut self,
        violation: &Violation,
        label: Option<&RecordLabel>,
    ) -> std::io::Result<()> {
        let message = match label {
            Some(label) => format!(
                "'{}' (comment {}): {}",
                label.team_name, label.comment_id, violation
            ),
            None => violation.to_string(),
        };
        self.write_labeled(violation.severity(), &message)
    }

    /// Writes one export result.
    pub fn write_export(
        &mut self,
        format: ExportFormat,
        detail: &str,
        ok: bool,
    ) -> std::io::Result<()> {
        if ok {
            writeln!(self.writer, "  {}: {}", format, detail)
        } else {
            self.write_labeled(Severity::Error, &format!("{}: {}", format, detail))
        }
    }

    /// Writes the closing summary line.
    pub fn write_summary(
        &mut self,
        comments: usize,
        accepted: usize,
        members: usize,
        rejected: usize,
        warnings: usize,
    ) -> std::io::Result<()> {
        writeln!(self.writer)?;

        let message = format!(
            "Read {} comment(s): {} team(s) accepted ({} member(s)), {} rejected, {} warning(s)",
            comments, accepted, members, rejected, warnings
        );

        if !self.use_colors {
            return writeln!(self.writer, "{}", message);
        }

        if rejected == 0 {
            writeln!(self.writer, "{}", format!("✓ {}", message).green().bold())
        } else {
            writeln!(self.writer, "{}", format!("✗ {}", message).red().bold())
        }
    }

    /// Writes a startup error.
    pub fn write_error(&mut self, message: &str) -> std::io::Result<()> {
        if self.use_colors {
            writeln!(self.writer, "{} {}", "Error:".red().bold(), message)?;
        } else {
            writeln!(self.writer, "Error: {}", message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use team_registry_core::{Member, ParseFailure};

    fn record(comment_id: u64, team_name: &str) -> TeamRecord {
        TeamRecord {
            team_name: team_name.to_string(),
            members: vec![Member::new("张三", "zhangsan")],
            team_reference: "team-alpha".to_string(),
            team_repository: None,
            declared_submission_time: None,
            author: "zhangsan".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap(),
            comment_id,
        }
    }

    fn fixture() -> (RepoId, Vec<SkippedComment>, Vec<RecordLabel>, ValidationOutcome) {
        let repo = RepoId::new("course", "registrations").unwrap();
        let skipped = vec![
            SkippedComment {
                comment_id: 5,
                author: "lurker".to_string(),
                failure: ParseFailure::NotARegistration,
            },
            SkippedComment {
                comment_id: 6,
                author: "lisi".to_string(),
                failure: ParseFailure::MissingTeamName,
            },
        ];
        let accepted = record(1, "Alpha");
        let duplicate = record(2, "Alpha");
        let labels = vec![RecordLabel::from(&accepted), RecordLabel::from(&duplicate)];
        let outcome = ValidationOutcome {
            valid: vec![accepted],
            invalid: vec![ValidationResult {
                record: duplicate,
                violations: vec![Violation::duplicate_team_name(1, "Alpha", 0, 1)],
            }],
            warnings: vec![Violation::invalid_repository_url(0, "http://x", "not https")],
        };
        (repo, skipped, labels, outcome)
    }

    #[test]
    fn test_human_output_sections() {
        let (repo, skipped, labels, outcome) = fixture();
        let report = RunReport {
            repo: &repo,
            issue: 1,
            comments: 4,
            skipped: &skipped,
            labels: &labels,
            outcome: &outcome,
            export: None,
        };

        let mut buf = Vec::new();
        report.write_human(&mut buf, false).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("==> incomplete registrations"));
        assert!(text.contains("comment 6 by @lisi: team name is missing"));
        assert!(!text.contains("lurker"));
        assert!(text.contains("==> rejected records"));
        assert!(text.contains("[ERROR]   duplicate team name 'Alpha'"));
        assert!(text.contains("'Alpha' (comment 1): invalid repository URL"));
        assert!(text.contains("Read 4 comment(s): 1 team(s) accepted (1 member(s)), 1 rejected, 1 warning(s)"));
        assert!(!text.contains("==> reports"));
    }

    #[test]
    fn test_json_output_serialize() {
        let (repo, skipped, labels, outcome) = fixture();
        let report = RunReport {
            repo: &repo,
            issue: 1,
            comments: 4,
            skipped: &skipped,
            labels: &labels,
            outcome: &outcome,
            export: None,
        };

        let mut buf = Vec::new();
        report.write_json(&mut buf).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(json["repo"], "course/registrations");
        assert_eq!(json["accepted"].as_array().unwrap().len(), 1);
        assert_eq!(json["members"], 1);
        assert_eq!(json["rejected"][0]["comment_id"], 2);
        assert_eq!(json["rejected"][0]["violations"][0]["code"], "duplicate_team_name");
        assert_eq!(json["rejected"][0]["violations"][0]["severity"], "error");
        assert_eq!(json["skipped"].as_array().unwrap().len(), 1);
        assert_eq!(json["skipped"][0]["failure"]["code"], "missing_team_name");
        assert_eq!(json["warnings"][0]["comment_id"], 1);
        assert!(json["exports"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_json_export_entries() {
        let (repo, skipped, labels, outcome) = fixture();
        let export = ExportReport {
            outputs: vec![(ExportFormat::Csv, Ok(PathBuf::from("data/team_info.csv")))],
        };
        let report = RunReport {
            repo: &repo,
            issue: 1,
            comments: 4,
            skipped: &skipped,
            labels: &labels,
            outcome: &outcome,
            export: Some(&export),
        };

        let json = serde_json::to_value(report.to_json()).unwrap();
        assert_eq!(json["exports"][0]["format"], "csv");
        assert_eq!(json["exports"][0]["path"], "data/team_info.csv");
        assert!(json["exports"][0].get("error").is_none());
    }

    #[test]
    fn test_accepted_members_total() {
        let (repo, skipped, labels, mut outcome) = fixture();
        let mut bigger = record(3, "Beta");
        bigger.members.push(Member::new("李四", "lisi"));
        bigger.members.push(Member::new("王五", "wangwu"));
        outcome.valid.push(bigger);

        let report = RunReport {
            repo: &repo,
            issue: 1,
            comments: 5,
            skipped: &skipped,
            labels: &labels,
            outcome: &outcome,
            export: None,
        };

        assert_eq!(report.accepted_members(), 4);
        assert_eq!(serde_json::to_value(report.to_json()).unwrap()["members"], 4);
    }

    #[test]
    fn test_human_output_summary_no_colors() {
        let mut buf = Vec::new();
        let mut output = HumanOutput::new(&mut buf, false);
        output.write_summary(3, 2, 7, 0, 0).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("2 team(s) accepted (7 member(s)), 0 rejected"));
    }

    #[test]
    fn test_write_error() {
        let mut buf = Vec::new();
        let mut output = HumanOutput::new(&mut buf, false);
        output.write_error("boom").unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "Error: boom\n");
    }
}
