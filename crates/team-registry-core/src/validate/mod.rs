//! Validation module for team records.
//!
//! This module applies batch-level rules to parsed records: required
//! fields, duplicate team names, team size bounds and reference shapes.
//!
//! # Example
//!
//! ```rust
//! use team_registry_core::validate::{validate, MemberBounds, ValidationOptions};
//!
//! let options = ValidationOptions::new()
//!     .with_member_bounds(MemberBounds::new(Some(2), Some(5)).unwrap());
//!
//! let outcome = validate(Vec::new(), &options);
//! assert!(outcome.is_ok());
//! assert_eq!(outcome.total(), 0);
//! ```

pub mod checks;
mod error;
mod options;

// Re-export public types
pub use error::{Severity, ValidationOutcome, ValidationResult, Violation};
pub use options::{MemberBounds, OptionsError, ValidationOptions};

use crate::parse::TeamRecord;
use checks::CheckRunner;
use log::{debug, info};

/// Validates a batch of records with the built-in checks.
///
/// Records with any error-severity violation are rejected. Input order is
/// preserved in both the accepted and rejected lists.
pub fn validate(records: Vec<TeamRecord>, options: &ValidationOptions) -> ValidationOutcome {
    validate_with(&CheckRunner::with_all_checks(), records, options)
}

/// Validates a batch of records with a custom set of checks.
pub fn validate_with(
    runner: &CheckRunner,
    records: Vec<TeamRecord>,
    options: &ValidationOptions,
) -> ValidationOutcome {
    if options.skip_validation {
        info!("Validation skipped, accepting {} records", records.len());
        return ValidationOutcome {
            valid: records,
            ..ValidationOutcome::default()
        };
    }

    let mut per_record: Vec<Vec<Violation>> = vec![Vec::new(); records.len()];
    for violation in runner.run(&records, options) {
        match per_record.get_mut(violation.record()) {
            Some(slot) => slot.push(violation),
            None => debug!("Dropping violation for unknown record: {}", violation),
        }
    }

    let mut outcome = ValidationOutcome::default();
    for (record, mut violations) in records.into_iter().zip(per_record) {
        violations.sort_by_key(|v| std::cmp::Reverse(v.severity()));
        outcome.push(ValidationResult { record, violations });
    }

    info!(
        "Validation complete: {} accepted, {} rejected, {} warnings",
        outcome.valid.len(),
        outcome.invalid.len(),
        outcome.warnings.len()
    );
    outcome
}
