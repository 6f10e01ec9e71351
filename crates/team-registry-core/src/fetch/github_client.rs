//! Comment source trait abstraction.
//!
//! This module provides a trait-based abstraction over the GitHub API call
//! that lists issue comments, so the collection pipeline can run against
//! octocrab in the CLI or an in-memory source in tests.

use super::repo::RepoId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One comment on a GitHub issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueComment {
    /// The comment ID.
    pub id: u64,
    /// Login of the comment author.
    pub author: String,
    /// When the comment was created.
    pub created_at: DateTime<Utc>,
    /// Raw Markdown body.
    pub body: String,
}

impl IssueComment {
    /// Creates a comment.
    pub fn new(
        id: u64,
        author: impl Into<String>,
        created_at: DateTime<Utc>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id,
            author: author.into(),
            created_at,
            body: body.into(),
        }
    }
}

/// Errors that can occur when listing issue comments.
///
/// Every variant names the repository and issue being read.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Credentials were rejected or lack access.
    #[error("not authorized to read {repo}#{issue}: {message}")]
    Unauthorized {
        repo: RepoId,
        issue: u64,
        message: String,
    },

    /// The repository or issue does not exist.
    #[error("issue {repo}#{issue} not found")]
    NotFound { repo: RepoId, issue: u64 },

    /// The API rate limit was exceeded.
    #[error("rate limit exceeded while reading {repo}#{issue}")]
    RateLimited { repo: RepoId, issue: u64 },

    /// The request never reached GitHub or the connection failed.
    #[error("network error while reading {repo}#{issue}: {message}")]
    Network {
        repo: RepoId,
        issue: u64,
        message: String,
    },

    /// Any other API failure.
    #[error("GitHub API error while reading {repo}#{issue}: {message}")]
    Api {
        repo: RepoId,
        issue: u64,
        message: String,
    },
}

impl FetchError {
    /// Returns a stable, machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            FetchError::Unauthorized { .. } => "unauthorized",
            FetchError::NotFound { .. } => "not_found",
            FetchError::RateLimited { .. } => "rate_limited",
            FetchError::Network { .. } => "network",
            FetchError::Api { .. } => "api",
        }
    }
}

/// Trait for sources of issue comments.
///
/// Implementations must return every comment on the issue, following
/// pagination to the end, in creation order.
///
/// # Example
///
/// ```rust
/// use team_registry_core::fetch::{CommentSource, FetchError, IssueComment, RepoId};
///
/// struct NoComments;
///
/// #[async_trait::async_trait]
/// impl CommentSource for NoComments {
///     async fn issue_comments(
///         &self,
///         _repo: &RepoId,
///         _issue: u64,
///     ) -> Result<Vec<IssueComment>, FetchError> {
///         Ok(Vec::new())
///     }
/// }
/// ```
#[async_trait]
pub trait CommentSource: Send + Sync {
    /// Lists all comments on an issue.
    ///
    /// # Arguments
    ///
    /// * `repo` - The repository holding the issue
    /// * `issue` - The issue number
    async fn issue_comments(
        &self,
        repo: &RepoId,
        issue: u64,
    ) -> Result<Vec<IssueComment>, FetchError>;
}
