//! Violation and result types for team record validation.
//!
//! Violations are data: they describe why a record was rejected or
//! flagged, and never abort a validation run.

use crate::parse::TeamRecord;
use serde::Serialize;
use thiserror::Error;

/// The severity of a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reported, but the record is still accepted.
    Warning,
    /// The record is rejected.
    Error,
}

/// A problem found with a team record.
///
/// Every variant carries `record`, the index of the offending record in the
/// batch being validated.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Violation {
    /// A required field is empty.
    #[error("missing required field '{field}'")]
    MissingField {
        /// Index of the record in the batch.
        record: usize,
        /// Name of the empty field.
        field: &'static str,
    },

    /// Another record already registered this team name.
    #[error(
        "duplicate team name '{team_name}' (first registered in comment {first_comment_id})"
    )]
    DuplicateTeamName {
        /// Index of the record in the batch.
        record: usize,
        /// The repeated name.
        team_name: String,
        /// Index of the first record with this name.
        first_record: usize,
        /// Comment that first registered the name.
        first_comment_id: u64,
    },

    /// Fewer members than the configured minimum.
    #[error("team has {count} members, fewer than the minimum of {min}")]
    TooFewMembers {
        /// Index of the record in the batch.
        record: usize,
        /// Number of members listed.
        count: usize,
        /// The minimum allowed.
        min: usize,
    },

    /// More members than the configured maximum.
    #[error("team has {count} members, more than the maximum of {max}")]
    TooManyMembers {
        /// Index of the record in the batch.
        record: usize,
        /// Number of members listed.
        count: usize,
        /// The maximum allowed.
        max: usize,
    },

    /// The team account reference has an unrecognized shape.
    #[error("malformed team reference '{reference}' - {reason}")]
    MalformedTeamReference {
        /// Index of the record in the batch.
        record: usize,
        /// The reference as written.
        reference: String,
        /// Why it was not recognized.
        reason: String,
    },

    /// The project repository is not an `https` URL on a known host.
    #[error("invalid repository URL '{url}' - {reason}")]
    InvalidRepositoryUrl {
        /// Index of the record in the batch.
        record: usize,
        /// The URL as written.
        url: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl Violation {
    /// Creates a missing field violation.
    pub fn missing_field(record: usize, field: &'static str) -> Self {
        Self::MissingField { record, field }
    }

    /// Creates a duplicate team name violation.
    pub fn duplicate_team_name(
        record: usize,
        team_name: impl Into<String>,
        first_record: usize,
        first_comment_id: u64,
    ) -> Self {
        Self::DuplicateTeamName {
            record,
            team_name: team_name.into(),
            first_record,
            first_comment_id,
        }
    }

    /// Creates a malformed team reference violation.
    pub fn malformed_team_reference(
        record: usize,
        reference: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedTeamReference {
            record,
            reference: reference.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid repository URL violation.
    pub fn invalid_repository_url(
        record: usize,
        url: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidRepositoryUrl {
            record,
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Returns the index of the record this violation belongs to.
    pub fn record(&self) -> usize {
        match self {
            Violation::MissingField { record, .. }
            | Violation::DuplicateTeamName { record, .. }
            | Violation::TooFewMembers { record, .. }
            | Violation::TooManyMembers { record, .. }
            | Violation::MalformedTeamReference { record, .. }
            | Violation::InvalidRepositoryUrl { record, .. } => *record,
        }
    }

    /// Returns a stable, machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Violation::MissingField { .. } => "missing_field",
            Violation::DuplicateTeamName { .. } => "duplicate_team_name",
            Violation::TooFewMembers { .. } => "too_few_members",
            Violation::TooManyMembers { .. } => "too_many_members",
            Violation::MalformedTeamReference { .. } => "malformed_team_reference",
            Violation::InvalidRepositoryUrl { .. } => "invalid_repository_url",
        }
    }

    /// Returns the severity of this violation.
    pub fn severity(&self) -> Severity {
        match self {
            Violation::InvalidRepositoryUrl { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// A record together with the violations found for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// The validated record.
    pub record: TeamRecord,
    /// Violations found; empty when the record passed.
    pub violations: Vec<Violation>,
}

impl ValidationResult {
    /// Returns true if no violation rejects the record.
    pub fn is_ok(&self) -> bool {
        !self.violations.iter().any(|v| v.severity() == Severity::Error)
    }

    /// Returns only rejecting violations.
    pub fn errors_only(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity() == Severity::Error)
    }

    /// Returns only warnings.
    pub fn warnings_only(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity() == Severity::Warning)
    }
}

/// The outcome of validating a batch of records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    /// Accepted records, in input order.
    pub valid: Vec<TeamRecord>,
    /// Rejected records with their violations, in input order.
    pub invalid: Vec<ValidationResult>,
    /// Warnings raised on accepted records.
    pub warnings: Vec<Violation>,
}

impl ValidationOutcome {
    /// Returns true if every record was accepted.
    pub fn is_ok(&self) -> bool {
        self.invalid.is_empty()
    }

    /// Total number of records validated.
    pub fn total(&self) -> usize {
        self.valid.len() + self.invalid.len()
    }

    /// Adds a validated record to the accepted or rejected list.
    pub(crate) fn push(&mut self, result: ValidationResult) {
        if result.is_ok() {
            self.warnings.extend(result.violations);
            self.valid.push(result.record);
        } else {
            self.invalid.push(result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::IssueComment;
    use crate::parse::parse_comment;
    use chrono::{DateTime, Utc};

    fn record() -> TeamRecord {
        let comment = IssueComment::new(
            1,
            "ann",
            DateTime::<Utc>::UNIX_EPOCH,
            "Team Name: Alpha\nMembers:\n- Ann (ann)\nTeam Account: alpha\n",
        );
        parse_comment(&comment).unwrap()
    }

    #[test]
    fn member_bound_messages_include_numbers() {
        let few = Violation::TooFewMembers {
            record: 0,
            count: 1,
            min: 2,
        };
        assert!(few.to_string().contains('1'));
        assert!(few.to_string().contains('2'));

        let many = Violation::TooManyMembers {
            record: 0,
            count: 7,
            max: 5,
        };
        assert_eq!(
            many.to_string(),
            "team has 7 members, more than the maximum of 5"
        );
    }

    #[test]
    fn duplicate_message() {
        let violation = Violation::duplicate_team_name(3, "Alpha", 0, 11);
        assert!(violation.to_string().starts_with("duplicate team name"));
        assert_eq!(violation.record(), 3);
        assert_eq!(violation.severity(), Severity::Error);
    }

    #[test]
    fn repository_url_is_warning() {
        let violation = Violation::invalid_repository_url(0, "ftp://x", "not https");
        assert_eq!(violation.severity(), Severity::Warning);
        assert_eq!(violation.code(), "invalid_repository_url");
    }

    #[test]
    fn serialized_type_tag_matches_code() {
        let violation = Violation::missing_field(2, "team_name");
        let json = serde_json::to_value(&violation).unwrap();
        assert_eq!(json["type"], violation.code());
        assert_eq!(json["record"], 2);
    }

    #[test]
    fn outcome_routes_by_severity() {
        let mut outcome = ValidationOutcome::default();
        outcome.push(ValidationResult {
            record: record(),
            violations: vec![Violation::invalid_repository_url(0, "x", "y")],
        });
        outcome.push(ValidationResult {
            record: record(),
            violations: vec![Violation::missing_field(1, "members")],
        });

        assert_eq!(outcome.valid.len(), 1);
        assert_eq!(outcome.invalid.len(), 1);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.total(), 2);
        assert!(!outcome.is_ok());
    }
}
