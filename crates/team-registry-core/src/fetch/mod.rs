//! Access to the issue comments that hold team registrations.

mod github_client;
mod repo;

pub use github_client::{CommentSource, FetchError, IssueComment};
pub use repo::{RepoId, RepoIdError};
