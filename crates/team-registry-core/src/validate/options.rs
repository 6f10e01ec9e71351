//! Validation options.

use serde::Serialize;
use thiserror::Error;

/// Errors from building validation options.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OptionsError {
    /// The minimum team size is larger than the maximum.
    #[error("minimum team size {min} is larger than maximum {max}")]
    InvertedBounds {
        /// Requested minimum.
        min: usize,
        /// Requested maximum.
        max: usize,
    },
}

/// Allowed range of team sizes, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemberBounds {
    min: usize,
    max: Option<usize>,
}

impl MemberBounds {
    /// Smallest team accepted by default.
    pub const DEFAULT_MIN: usize = 1;

    /// Creates bounds, rejecting `min > max`.
    ///
    /// `None` leaves either end at its default: a minimum of one member and
    /// no maximum.
    pub fn new(min: Option<usize>, max: Option<usize>) -> Result<Self, OptionsError> {
        let min = min.unwrap_or(Self::DEFAULT_MIN);
        if let Some(max) = max {
            if min > max {
                return Err(OptionsError::InvertedBounds { min, max });
            }
        }
        Ok(Self { min, max })
    }

    /// The smallest allowed team size.
    pub fn min(&self) -> usize {
        self.min
    }

    /// The largest allowed team size, if bounded.
    pub fn max(&self) -> Option<usize> {
        self.max
    }
}

impl Default for MemberBounds {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: None,
        }
    }
}

/// Configuration options for validating team records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationOptions {
    /// Allowed team sizes.
    pub member_bounds: MemberBounds,
    /// If true, several records may share a team name.
    pub allow_duplicate_team_names: bool,
    /// If true, every record is accepted without checks.
    pub skip_validation: bool,
}

impl ValidationOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the allowed team sizes.
    pub fn with_member_bounds(mut self, bounds: MemberBounds) -> Self {
        self.member_bounds = bounds;
        self
    }

    /// Sets whether duplicate team names are allowed.
    pub fn with_allow_duplicate_team_names(mut self, value: bool) -> Self {
        self.allow_duplicate_team_names = value;
        self
    }

    /// Sets whether validation is skipped.
    pub fn with_skip_validation(mut self, value: bool) -> Self {
        self.skip_validation = value;
        self
    }
}
