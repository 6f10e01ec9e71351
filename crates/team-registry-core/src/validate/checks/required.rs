//! Required field check.

use super::{Check, CheckContext};
use crate::validate::Violation;

/// A check that reports records with an empty team name, member list or
/// team reference.
///
/// The parser never produces such records, but records can also be built
/// or deserialized directly.
#[derive(Debug, Clone, Default)]
pub struct RequiredFieldsCheck;

impl RequiredFieldsCheck {
    /// Creates a new required fields check.
    pub fn new() -> Self {
        Self
    }
}

impl Check for RequiredFieldsCheck {
    fn name(&self) -> &'static str {
        "required"
    }

    fn run(&self, ctx: &CheckContext) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (index, record) in ctx.records.iter().enumerate() {
            if record.team_name.trim().is_empty() {
                violations.push(Violation::missing_field(index, "team_name"));
            }
            if record.members.is_empty() {
                violations.push(Violation::missing_field(index, "members"));
            }
            if record.team_reference.trim().is_empty() {
                violations.push(Violation::missing_field(index, "team_reference"));
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ValidationOptions;
    use crate::validate::checks::test_support::record;

    #[test]
    fn complete_record_passes() {
        let records = [record(1, "Alpha", 3)];
        let options = ValidationOptions::new();
        let ctx = CheckContext::new(&records, &options);
        assert!(RequiredFieldsCheck::new().run(&ctx).is_empty());
    }

    #[test]
    fn reports_each_empty_field() {
        let mut blank = record(1, "   ", 0);
        blank.team_reference = String::new();
        let records = [record(0, "Alpha", 2), blank];
        let options = ValidationOptions::new();
        let ctx = CheckContext::new(&records, &options);

        let violations = RequiredFieldsCheck::new().run(&ctx);
        assert_eq!(
            violations,
            vec![
                Violation::missing_field(1, "team_name"),
                Violation::missing_field(1, "members"),
                Violation::missing_field(1, "team_reference"),
            ]
        );
    }
}
