//! Team reference shape check.

use super::{Check, CheckContext};
use crate::parse::AccountReference;
use crate::validate::Violation;

/// A check that the team reference is a known-host URL or a valid handle.
#[derive(Debug, Clone, Default)]
pub struct TeamReferenceCheck;

impl TeamReferenceCheck {
    /// Creates a new team reference check.
    pub fn new() -> Self {
        Self
    }
}

impl Check for TeamReferenceCheck {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn run(&self, ctx: &CheckContext) -> Vec<Violation> {
        ctx.records
            .iter()
            .enumerate()
            // Empty references are reported by the required fields check
            .filter(|(_, record)| !record.team_reference.trim().is_empty())
            .filter_map(|(index, record)| {
                AccountReference::parse(&record.team_reference)
                    .err()
                    .map(|reason| {
                        Violation::malformed_team_reference(index, &record.team_reference, reason)
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ValidationOptions;
    use crate::validate::checks::test_support::record;

    fn run_check(references: &[&str]) -> Vec<Violation> {
        let records: Vec<_> = references
            .iter()
            .enumerate()
            .map(|(i, reference)| {
                let mut record = record(i as u64, "Team", 2);
                record.team_reference = reference.to_string();
                record
            })
            .collect();
        let options = ValidationOptions::new();
        let ctx = CheckContext::new(&records, &options);
        TeamReferenceCheck::new().run(&ctx)
    }

    #[test]
    fn valid_references() {
        assert!(
            run_check(&[
                "github.com/alpha-team",
                "https://github.com/alpha-team",
                "@alpha-team",
                "alpha-team",
                "https://gitee.com/alpha",
            ])
            .is_empty()
        );
    }

    #[test]
    fn malformed_references() {
        let violations = run_check(&["ok-team", "https://example.com/x", "bad--name", "two words"]);
        let indices: Vec<_> = violations.iter().map(Violation::record).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert!(violations[0].to_string().starts_with("malformed team reference"));
    }

    #[test]
    fn empty_reference_left_to_required_check() {
        assert!(run_check(&[""]).is_empty());
    }
}
