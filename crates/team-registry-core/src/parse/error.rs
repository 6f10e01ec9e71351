//! Failure types for registration parsing.
//!
//! A comment that does not form a complete registration is an expected,
//! common case. These failures are returned as data and never abort a run.

use serde::Serialize;
use thiserror::Error;

/// Why a comment could not be turned into a team record.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ParseFailure {
    /// The comment contains none of the template labels.
    #[error("comment is not a team registration")]
    NotARegistration,

    /// The team name label is absent or has no content.
    #[error("team name is missing")]
    MissingTeamName,

    /// The member list label is absent.
    #[error("member list is missing")]
    MissingMembers,

    /// The member list label is present but no member follows it.
    #[error("member list has no entries")]
    NoMemberEntries,

    /// A line in the member list could not be read as a member.
    #[error("line {line}: cannot read member entry '{text}'")]
    MalformedMember {
        /// The line number within the comment (1-based).
        line: usize,
        /// The offending entry text.
        text: String,
    },

    /// The team account label is absent or has no content.
    #[error("team account reference is missing")]
    MissingTeamReference,

    /// The team account reference is not a recognized URL or handle.
    #[error("malformed team reference '{reference}' - {reason}")]
    MalformedTeamReference {
        /// The reference text as written.
        reference: String,
        /// Why it was not recognized.
        reason: String,
    },
}

impl ParseFailure {
    /// Creates a malformed member failure.
    pub fn malformed_member(line: usize, text: impl Into<String>) -> Self {
        Self::MalformedMember {
            line,
            text: text.into(),
        }
    }

    /// Creates a malformed team reference failure.
    pub fn malformed_team_reference(
        reference: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedTeamReference {
            reference: reference.into(),
            reason: reason.into(),
        }
    }

    /// Returns a stable, machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            ParseFailure::NotARegistration => "not_a_registration",
            ParseFailure::MissingTeamName => "missing_team_name",
            ParseFailure::MissingMembers => "missing_members",
            ParseFailure::NoMemberEntries => "no_member_entries",
            ParseFailure::MalformedMember { .. } => "malformed_member",
            ParseFailure::MissingTeamReference => "missing_team_reference",
            ParseFailure::MalformedTeamReference { .. } => "malformed_team_reference",
        }
    }

    /// Returns true if the comment looked like a registration attempt.
    ///
    /// Casual replies yield `false`; everything else is a submission
    /// with a mistake in it.
    pub fn is_registration_attempt(&self) -> bool {
        !matches!(self, ParseFailure::NotARegistration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_serialized_tag() {
        let failures = [
            ParseFailure::NotARegistration,
            ParseFailure::MissingTeamName,
            ParseFailure::MissingMembers,
            ParseFailure::NoMemberEntries,
            ParseFailure::malformed_member(3, "Alice"),
            ParseFailure::MissingTeamReference,
            ParseFailure::malformed_team_reference("x y", "contains whitespace"),
        ];

        for failure in failures {
            let json = serde_json::to_value(&failure).unwrap();
            assert_eq!(json["code"], failure.code());
        }
    }

    #[test]
    fn malformed_reference_keeps_reason_field() {
        let failure = ParseFailure::malformed_team_reference("x y", "contains whitespace");
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["code"], "malformed_team_reference");
        assert_eq!(json["reference"], "x y");
        assert_eq!(json["reason"], "contains whitespace");
    }

    #[test]
    fn malformed_member_message() {
        let failure = ParseFailure::malformed_member(4, "Alice");
        assert!(failure.to_string().contains("line 4"));
        assert!(failure.to_string().contains("Alice"));
    }

    #[test]
    fn registration_attempt() {
        assert!(!ParseFailure::NotARegistration.is_registration_attempt());
        assert!(ParseFailure::MissingTeamName.is_registration_attempt());
    }
}
