//! Repository identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a repository identifier is not `owner/name`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid repository '{input}': expected 'owner/name'")]
pub struct RepoIdError {
    /// The rejected input.
    pub input: String,
}

/// A GitHub repository, written `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepoId {
    owner: String,
    name: String,
}

impl RepoId {
    /// Creates a repository identifier from its parts.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, RepoIdError> {
        let owner = owner.into();
        let name = name.into();
        let valid = |part: &str| !part.is_empty() && !part.contains(['/', ' ']);
        if valid(&owner) && valid(&name) {
            Ok(Self { owner, name })
        } else {
            Err(RepoIdError {
                input: format!("{}/{}", owner, name),
            })
        }
    }

    /// The owning user or organization.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The repository name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for RepoId {
    type Err = RepoIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let error = || RepoIdError {
            input: s.to_string(),
        };
        let (owner, name) = s.split_once('/').ok_or_else(error)?;
        Self::new(owner, name).map_err(|_| error())
    }
}

impl TryFrom<String> for RepoId {
    type Error = RepoIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RepoId> for String {
    fn from(repo: RepoId) -> Self {
        repo.to_string()
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
