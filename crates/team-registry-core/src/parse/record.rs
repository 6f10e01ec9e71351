//! Record types produced by the registration parser.
//!
//! A [`Registration`] holds what was written in a comment body. A
//! [`TeamRecord`] is a registration plus the provenance of the comment it
//! came from, and is the unit that flows through validation and export.

use crate::fetch::IssueComment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One member of a registered team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Name as written by the submitter.
    pub display_name: String,
    /// The member's own GitHub ID or handle (without a leading '@').
    pub account: String,
    /// Profile link, when the submitter provided one.
    #[serde(default)]
    pub profile_url: Option<String>,
}

impl Member {
    /// Creates a member without a profile link.
    pub fn new(display_name: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            account: account.into(),
            profile_url: None,
        }
    }

    /// Sets the profile link.
    pub fn with_profile_url(mut self, url: impl Into<String>) -> Self {
        self.profile_url = Some(url.into());
        self
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.account)
    }
}

/// The fields of a registration template, as extracted from comment text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// The team name.
    pub team_name: String,
    /// Members in the order they were listed.
    pub members: Vec<Member>,
    /// Reference to the team's shared account (URL or handle).
    pub team_reference: String,
    /// The team's project repository, if given.
    pub team_repository: Option<String>,
    /// Submission time as written by the submitter, if given.
    pub declared_submission_time: Option<String>,
}

/// A parsed team registration together with the comment it came from.
///
/// Records are never modified after parsing. Whether a record is acceptable
/// is decided by the validator and is not stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    /// The team name.
    pub team_name: String,
    /// Members in the order they were listed.
    pub members: Vec<Member>,
    /// Reference to the team's shared account (URL or handle).
    pub team_reference: String,
    /// The team's project repository, if given.
    #[serde(default)]
    pub team_repository: Option<String>,
    /// Submission time as written by the submitter, if given.
    #[serde(default)]
    pub declared_submission_time: Option<String>,
    /// Login of the comment author.
    pub author: String,
    /// When the comment was created.
    pub timestamp: DateTime<Utc>,
    /// ID of the source comment.
    pub comment_id: u64,
}

impl TeamRecord {
    /// Attaches comment provenance to a parsed registration.
    pub fn from_registration(registration: Registration, comment: &IssueComment) -> Self {
        Self {
            team_name: registration.team_name,
            members: registration.members,
            team_reference: registration.team_reference,
            team_repository: registration.team_repository,
            declared_submission_time: registration.declared_submission_time,
            author: comment.author.clone(),
            timestamp: comment.created_at,
            comment_id: comment.id,
        }
    }

    /// Renders the member list as `name (account); name (account)`.
    pub fn members_summary(&self) -> String {
        self.members
            .iter()
            .map(Member::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_display() {
        let member = Member::new("张三", "zhangsan");
        assert_eq!(member.to_string(), "张三 (zhangsan)");
    }

    #[test]
    fn from_registration_keeps_provenance() {
        let registration = Registration {
            team_name: "Alpha".to_string(),
            members: vec![Member::new("Ann", "ann"), Member::new("Bo", "bo")],
            team_reference: "alpha-team".to_string(),
            team_repository: None,
            declared_submission_time: Some("2025-01-15".to_string()),
        };
        let comment = IssueComment::new(42, "ann", DateTime::<Utc>::UNIX_EPOCH, "");

        let record = TeamRecord::from_registration(registration, &comment);
        assert_eq!(record.comment_id, 42);
        assert_eq!(record.author, "ann");
        assert_eq!(record.timestamp, DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(record.declared_submission_time.as_deref(), Some("2025-01-15"));
        assert_eq!(record.members_summary(), "Ann (ann); Bo (bo)");
    }
}
