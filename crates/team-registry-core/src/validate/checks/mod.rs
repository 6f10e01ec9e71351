//! Check traits and runner for team record validation.
//!
//! Each check looks at the whole batch of records and reports the
//! violations it finds, tagged with the index of the offending record.
//! Checks are independent and all of them run.

mod duplicates;
mod members;
mod reference;
mod repository;
mod required;

pub use duplicates::DuplicateNamesCheck;
pub use members::MemberCountCheck;
pub use reference::TeamReferenceCheck;
pub use repository::RepositoryUrlCheck;
pub use required::RequiredFieldsCheck;

use crate::parse::TeamRecord;
use crate::validate::{Violation, ValidationOptions};
use log::{debug, info};

/// Context provided to checks.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    /// The records being validated, in input order.
    pub records: &'a [TeamRecord],
    /// Configuration options.
    pub options: &'a ValidationOptions,
}

impl<'a> CheckContext<'a> {
    /// Creates a new check context.
    pub fn new(records: &'a [TeamRecord], options: &'a ValidationOptions) -> Self {
        Self { records, options }
    }
}

/// A validation check over a batch of records.
pub trait Check: Send + Sync {
    /// Returns the name of this check.
    fn name(&self) -> &'static str;

    /// Runs the check and returns the violations found.
    fn run(&self, ctx: &CheckContext) -> Vec<Violation>;
}

/// Runs multiple validation checks and collects their violations.
#[derive(Default)]
pub struct CheckRunner {
    checks: Vec<Box<dyn Check>>,
}

impl CheckRunner {
    /// Creates a new check runner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a check runner with all built-in checks.
    pub fn with_all_checks() -> Self {
        let mut runner = Self::new();
        runner.add_check(RequiredFieldsCheck::new());
        runner.add_check(DuplicateNamesCheck::new());
        runner.add_check(MemberCountCheck::new());
        runner.add_check(TeamReferenceCheck::new());
        runner.add_check(RepositoryUrlCheck::new());
        runner
    }

    /// Adds a check.
    pub fn add_check<C: Check + 'static>(&mut self, check: C) {
        self.checks.push(Box::new(check));
    }

    /// Names of the registered checks, in run order.
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|check| check.name()).collect()
    }

    /// Runs all checks and returns the combined violations.
    pub fn run(&self, records: &[TeamRecord], options: &ValidationOptions) -> Vec<Violation> {
        info!(
            "Running {} checks over {} records",
            self.checks.len(),
            records.len()
        );
        let ctx = CheckContext::new(records, options);
        let mut violations = Vec::new();

        for check in &self.checks {
            debug!("Running check: {}", check.name());
            let found = check.run(&ctx);
            debug!("Check '{}' found {} issues", check.name(), found.len());
            violations.extend(found);
        }

        info!("Checks complete: {} total issues", violations.len());
        violations
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::fetch::IssueComment;
    use crate::parse::{Member, TeamRecord};
    use chrono::{DateTime, Utc};

    /// Builds a record with `size` members and a valid handle reference.
    pub fn record(comment_id: u64, team_name: &str, size: usize) -> TeamRecord {
        let comment = IssueComment::new(comment_id, "author", DateTime::<Utc>::UNIX_EPOCH, "");
        TeamRecord {
            team_name: team_name.to_string(),
            members: (0..size)
                .map(|i| Member::new(format!("Member {}", i), format!("member{}", i)))
                .collect(),
            team_reference: "team-account".to_string(),
            team_repository: None,
            declared_submission_time: None,
            author: comment.author,
            timestamp: comment.created_at,
            comment_id: comment.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::MemberBounds;

    #[test]
    fn check_runner_creation() {
        let runner = CheckRunner::new();
        assert!(runner.checks.is_empty());
    }

    #[test]
    fn check_runner_with_all_checks() {
        let runner = CheckRunner::with_all_checks();
        assert_eq!(
            runner.check_names(),
            vec!["required", "duplicates", "members", "reference", "repository"]
        );
    }

    #[test]
    fn all_checks_run_without_short_circuit() {
        let mut record = test_support::record(1, "", 0);
        record.team_reference = "not a handle".to_string();
        let options = ValidationOptions::new()
            .with_member_bounds(MemberBounds::new(Some(2), None).unwrap());

        let violations = CheckRunner::with_all_checks().run(&[record], &options);
        let codes: Vec<_> = violations.iter().map(Violation::code).collect();

        assert!(codes.contains(&"missing_field"));
        assert!(codes.contains(&"too_few_members"));
        assert!(codes.contains(&"malformed_team_reference"));
    }
}
