//! GitHub client implementation using octocrab.
//!
//! This module provides the octocrab-based implementation of the
//! `CommentSource` trait for use in the CLI.

use async_trait::async_trait;
use http::StatusCode;
use team_registry_core::{CommentSource, FetchError, IssueComment, RepoId};
use tracing::debug;

/// Number of comments requested per page (the API maximum).
const PAGE_SIZE: u8 = 100;

/// A wrapper around `octocrab::Octocrab` that implements `CommentSource`.
///
/// This wrapper is necessary due to Rust's orphan rules, which prevent
/// implementing external traits on external types.
pub struct OctocrabClient(pub octocrab::Octocrab);

impl OctocrabClient {
    /// Creates a new OctocrabClient from an Octocrab instance.
    pub fn new(client: octocrab::Octocrab) -> Self {
        Self(client)
    }
}

impl std::ops::Deref for OctocrabClient {
    type Target = octocrab::Octocrab;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Extracts the HTTP status code and message from an octocrab error.
fn extract_status_code(error: &octocrab::Error) -> Option<(StatusCode, &str)> {
    match error {
        octocrab::Error::GitHub { source, .. } => {
            Some((source.status_code, source.message.as_str()))
        }
        _ => None,
    }
}

/// Maps an API error status to a fetch error.
///
/// GitHub answers 403 both for missing permissions and for an exhausted
/// primary rate limit; the message tells them apart.
fn classify_status(status: StatusCode, message: &str, repo: &RepoId, issue: u64) -> FetchError {
    let repo = repo.clone();
    match status {
        StatusCode::UNAUTHORIZED => FetchError::Unauthorized {
            repo,
            issue,
            message: message.to_string(),
        },
        StatusCode::FORBIDDEN if message.to_ascii_lowercase().contains("rate limit") => {
            FetchError::RateLimited { repo, issue }
        }
        StatusCode::FORBIDDEN => FetchError::Unauthorized {
            repo,
            issue,
            message: message.to_string(),
        },
        StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited { repo, issue },
        StatusCode::NOT_FOUND => FetchError::NotFound { repo, issue },
        _ => FetchError::Api {
            repo,
            issue,
            message: format!("{}: {}", status, message),
        },
    }
}

/// Converts an octocrab error into a fetch error.
fn classify_error(error: octocrab::Error, repo: &RepoId, issue: u64) -> FetchError {
    if let Some((status, message)) = extract_status_code(&error) {
        return classify_status(status, message, repo, issue);
    }

    match error {
        octocrab::Error::Hyper { .. } | octocrab::Error::Service { .. } => FetchError::Network {
            repo: repo.clone(),
            issue,
            message: error.to_string(),
        },
        _ => FetchError::Api {
            repo: repo.clone(),
            issue,
            message: error.to_string(),
        },
    }
}

#[async_trait]
impl CommentSource for OctocrabClient {
    async fn issue_comments(
        &self,
        repo: &RepoId,
        issue: u64,
    ) -> Result<Vec<IssueComment>, FetchError> {
        let first_page = self
            .0
            .issues(repo.owner(), repo.name())
            .list_comments(issue)
            .per_page(PAGE_SIZE)
            .send()
            .await
            .map_err(|e| classify_error(e, repo, issue))?;

        let comments = self
            .0
            .all_pages(first_page)
            .await
            .map_err(|e| classify_error(e, repo, issue))?;

        debug!("Fetched {} comments from {}#{}", comments.len(), repo, issue);

        Ok(comments
            .into_iter()
            .map(|c| IssueComment::new(c.id.0, c.user.login, c.created_at, c.body.unwrap_or_default()))
            .collect())
    }
}
