//! Team size check.

use super::{Check, CheckContext};
use crate::validate::Violation;

/// A check that reports teams outside the configured size bounds.
#[derive(Debug, Clone, Default)]
pub struct MemberCountCheck;

impl MemberCountCheck {
    /// Creates a new member count check.
    pub fn new() -> Self {
        Self
    }
}

impl Check for MemberCountCheck {
    fn name(&self) -> &'static str {
        "members"
    }

    fn run(&self, ctx: &CheckContext) -> Vec<Violation> {
        let bounds = ctx.options.member_bounds;
        let mut violations = Vec::new();

        for (index, record) in ctx.records.iter().enumerate() {
            let count = record.members.len();
            if count < bounds.min() {
                violations.push(Violation::TooFewMembers {
                    record: index,
                    count,
                    min: bounds.min(),
                });
            }
            if let Some(max) = bounds.max().filter(|&max| count > max) {
                violations.push(Violation::TooManyMembers {
                    record: index,
                    count,
                    max,
                });
            }
        }

        violations
    }
}
