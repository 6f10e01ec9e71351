//! Collection pipeline: comments in, team records out.

use crate::fetch::{CommentSource, FetchError, IssueComment, RepoId};
use crate::parse::{ParseFailure, TeamRecord, parse_comment};
use log::{debug, info};
use serde::Serialize;

/// A comment that did not produce a team record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedComment {
    /// ID of the comment.
    pub comment_id: u64,
    /// Login of the comment author.
    pub author: String,
    /// Why the comment was skipped.
    pub failure: ParseFailure,
}

/// The records parsed from an issue, plus the comments that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Collection {
    /// Parsed records in comment order.
    pub records: Vec<TeamRecord>,
    /// Comments that did not parse, in comment order.
    pub skipped: Vec<SkippedComment>,
}

impl Collection {
    /// Total number of comments examined.
    pub fn comment_count(&self) -> usize {
        self.records.len() + self.skipped.len()
    }

    /// Skipped comments that look like failed registration attempts.
    pub fn failed_registrations(&self) -> impl Iterator<Item = &SkippedComment> {
        self.skipped
            .iter()
            .filter(|skipped| skipped.failure.is_registration_attempt())
    }
}

/// Parses comments in order, separating records from skipped comments.
pub fn parse_comments<'a, I>(comments: I) -> Collection
where
    I: IntoIterator<Item = &'a IssueComment>,
{
    let mut collection = Collection::default();
    for comment in comments {
        match parse_comment(comment) {
            Ok(record) => collection.records.push(record),
            Err(failure) => collection.skipped.push(SkippedComment {
                comment_id: comment.id,
                author: comment.author.clone(),
                failure,
            }),
        }
    }
    collection
}

/// Fetches every comment on an issue and parses the registrations in it.
pub async fn collect_registrations(
    source: &dyn CommentSource,
    repo: &RepoId,
    issue: u64,
) -> Result<Collection, FetchError> {
    info!("Fetching comments from {}#{}", repo, issue);
    let comments = source.issue_comments(repo, issue).await?;
    debug!("Fetched {} comments", comments.len());

    let collection = parse_comments(&comments);
    info!(
        "Parsed {} team records from {} comments ({} skipped)",
        collection.records.len(),
        collection.comment_count(),
        collection.skipped.len()
    );
    Ok(collection)
}
