//! Comment-level registration parser.
//!
//! Walks a comment line by line, using the template rules to pick out
//! labeled fields and the member block, then checks that every required
//! field is present.

use super::error::ParseFailure;
use super::record::{Member, Registration, TeamRecord};
use super::reference::AccountReference;
use super::template::{
    Field, MemberLine, parse_label_line, parse_member_entry, parse_member_line, strip_bullet,
};
use crate::fetch::IssueComment;
use log::{debug, trace};

/// Separators accepted between members listed on the label line itself.
const INLINE_MEMBER_SEPARATORS: [char; 5] = [',', '，', '、', ';', '；'];

/// Fields collected while walking a comment.
#[derive(Debug, Default)]
struct Collected<'a> {
    saw_label: bool,
    team_name: Option<&'a str>,
    team_reference: Option<&'a str>,
    team_repository: Option<&'a str>,
    submitted_at: Option<&'a str>,
    members_label_seen: bool,
    members: Vec<Member>,
    first_malformed: Option<ParseFailure>,
}

impl<'a> Collected<'a> {
    /// Stores a scalar field; the first non-empty value wins.
    fn set_scalar(&mut self, field: Field, content: &'a str) {
        if content.is_empty() {
            return;
        }
        let slot = match field {
            Field::TeamName => &mut self.team_name,
            Field::TeamReference => &mut self.team_reference,
            Field::Repository => &mut self.team_repository,
            Field::SubmittedAt => &mut self.submitted_at,
            Field::Members => return,
        };
        if slot.is_none() {
            *slot = Some(content);
        } else {
            trace!("Ignoring repeated {:?} label", field);
        }
    }

    fn record_malformed(&mut self, line: usize, text: &str) {
        debug!("Line {}: unreadable member entry '{}'", line, text);
        if self.first_malformed.is_none() {
            self.first_malformed = Some(ParseFailure::malformed_member(line, text));
        }
    }

    /// Reads members written on the label line, e.g. `Members: A (a), B (b)`.
    fn add_inline_members(&mut self, line: usize, content: &str) {
        for piece in content.split(INLINE_MEMBER_SEPARATORS) {
            let piece = strip_bullet(piece);
            if piece.is_empty() {
                continue;
            }
            match parse_member_entry(piece) {
                Some(member) => self.members.push(member),
                None => self.record_malformed(line, piece),
            }
        }
    }

    fn finish(self) -> Result<Registration, ParseFailure> {
        if !self.saw_label {
            return Err(ParseFailure::NotARegistration);
        }

        let team_name = self.team_name.ok_or(ParseFailure::MissingTeamName)?;

        if !self.members_label_seen {
            return Err(ParseFailure::MissingMembers);
        }
        if let Some(failure) = self.first_malformed {
            return Err(failure);
        }
        if self.members.is_empty() {
            return Err(ParseFailure::NoMemberEntries);
        }

        let team_reference = self
            .team_reference
            .ok_or(ParseFailure::MissingTeamReference)?;
        AccountReference::parse(team_reference)
            .map_err(|reason| ParseFailure::malformed_team_reference(team_reference, reason))?;

        Ok(Registration {
            team_name: team_name.to_string(),
            members: self.members,
            team_reference: team_reference.to_string(),
            team_repository: self.team_repository.map(str::to_string),
            declared_submission_time: self.submitted_at.map(str::to_string),
        })
    }
}

/// Parses the text of one comment into a registration.
///
/// Lines quoted from earlier comments (`> ...`) are ignored. The member
/// block starts at the members label and ends at the next label, or at a
/// blank line after at least one member unless the next non-blank line is
/// another list item or table row.
///
/// # Example
///
/// ```rust
/// use team_registry_core::parse::parse_registration;
///
/// let text = "\
/// **Team Name:** Alpha
/// **Members:**
/// - Ann (ann)
/// - Bo (bo)
/// **Team Account:** github.com/alpha-team
/// ";
///
/// let registration = parse_registration(text).unwrap();
/// assert_eq!(registration.team_name, "Alpha");
/// assert_eq!(registration.members.len(), 2);
/// ```
pub fn parse_registration(text: &str) -> Result<Registration, ParseFailure> {
    let mut collected = Collected::default();
    let mut in_members = false;
    let lines: Vec<&str> = text.lines().collect();

    for (line_idx, &line) in lines.iter().enumerate() {
        let line_num = line_idx + 1; // 1-based line numbers
        let trimmed = line.trim();

        if trimmed.starts_with('>') {
            trace!("Line {}: skipping quoted text", line_num);
            continue;
        }

        if let Some(label) = parse_label_line(line) {
            trace!("Line {}: {:?} label", line_num, label.field);
            collected.saw_label = true;
            in_members = label.field == Field::Members;

            if in_members {
                collected.members_label_seen = true;
                if !label.content.is_empty() {
                    collected.add_inline_members(line_num, label.content);
                }
            } else {
                collected.set_scalar(label.field, label.content);
            }
            continue;
        }

        if !in_members {
            continue;
        }

        if trimmed.is_empty() && !collected.members.is_empty() {
            in_members = member_block_continues(&lines[line_idx + 1..]);
            continue;
        }

        match parse_member_line(line) {
            MemberLine::Entry(member) => {
                trace!("Line {}: member {}", line_num, member);
                collected.members.push(member);
            }
            MemberLine::Skip => {}
            MemberLine::Malformed => collected.record_malformed(line_num, trimmed),
        }
    }

    collected.finish()
}

/// Returns true if the next non-blank, unquoted line is a list item or a
/// table row.
fn member_block_continues(rest: &[&str]) -> bool {
    rest.iter()
        .map(|line| line.trim())
        .find(|line| !line.is_empty() && !line.starts_with('>'))
        .is_some_and(|next| next.starts_with('|') || strip_bullet(next) != next)
}

/// Parses a comment into a team record carrying the comment's provenance.
pub fn parse_comment(comment: &IssueComment) -> Result<TeamRecord, ParseFailure> {
    match parse_registration(&comment.body) {
        Ok(registration) => {
            debug!(
                "Comment {} by {}: parsed team '{}' ({} members)",
                comment.id,
                comment.author,
                registration.team_name,
                registration.members.len()
            );
            Ok(TeamRecord::from_registration(registration, comment))
        }
        Err(failure) => {
            debug!(
                "Comment {} by {}: skipped ({})",
                comment.id, comment.author, failure
            );
            Err(failure)
        }
    }
}
