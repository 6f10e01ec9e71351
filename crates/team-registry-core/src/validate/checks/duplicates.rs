//! Duplicate team name detection check.
//!
//! This check detects when the same team name is registered more than once.

use super::{Check, CheckContext};
use crate::validate::Violation;
use std::collections::HashMap;

/// A check that detects duplicate team names.
///
/// Names are compared case-sensitively after trimming. The first record
/// with a name keeps it; every later one is reported.
#[derive(Debug, Clone, Default)]
pub struct DuplicateNamesCheck;

impl DuplicateNamesCheck {
    /// Creates a new duplicate names check.
    pub fn new() -> Self {
        Self
    }
}

impl Check for DuplicateNamesCheck {
    fn name(&self) -> &'static str {
        "duplicates"
    }

    fn run(&self, ctx: &CheckContext) -> Vec<Violation> {
        if ctx.options.allow_duplicate_team_names {
            return Vec::new();
        }

        let mut violations = Vec::new();
        // team name -> (first record index, first comment id)
        let mut seen: HashMap<&str, (usize, u64)> = HashMap::new();

        for (index, record) in ctx.records.iter().enumerate() {
            let name = record.team_name.trim();
            if name.is_empty() {
                continue;
            }

            if let Some(&(first_record, first_comment_id)) = seen.get(name) {
                violations.push(Violation::duplicate_team_name(
                    index,
                    name,
                    first_record,
                    first_comment_id,
                ));
            } else {
                seen.insert(name, (index, record.comment_id));
            }
        }

        violations
    }
}
