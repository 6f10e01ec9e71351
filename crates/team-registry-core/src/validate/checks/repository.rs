//! Project repository URL check.

use super::{Check, CheckContext};
use crate::parse::{AccountReference, Scheme};
use crate::validate::Violation;

/// A check that a declared project repository is an `https` URL on a
/// known code host.
///
/// Violations from this check are warnings; the record is still accepted.
#[derive(Debug, Clone, Default)]
pub struct RepositoryUrlCheck;

impl RepositoryUrlCheck {
    /// Creates a new repository URL check.
    pub fn new() -> Self {
        Self
    }
}

/// Returns why a repository URL is unacceptable, if it is.
fn repository_problem(url: &str) -> Option<String> {
    match AccountReference::parse(url) {
        Ok(AccountReference::Url {
            scheme: Some(Scheme::Https),
            ..
        }) => None,
        Ok(AccountReference::Url { .. }) => Some("URL must start with https://".to_string()),
        Ok(AccountReference::Handle(_)) => Some("not a URL".to_string()),
        Err(reason) => Some(reason),
    }
}

impl Check for RepositoryUrlCheck {
    fn name(&self) -> &'static str {
        "repository"
    }

    fn run(&self, ctx: &CheckContext) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (index, record) in ctx.records.iter().enumerate() {
            let Some(url) = record.team_repository.as_deref() else {
                continue;
            };
            if url.trim().is_empty() {
                continue;
            }
            if let Some(reason) = repository_problem(url) {
                violations.push(Violation::invalid_repository_url(index, url, reason));
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::checks::test_support::record;
    use crate::validate::{Severity, ValidationOptions};

    fn run_check(repository: Option<&str>) -> Vec<Violation> {
        let mut record = record(1, "Alpha", 2);
        record.team_repository = repository.map(str::to_string);
        let records = [record];
        let options = ValidationOptions::new();
        let ctx = CheckContext::new(&records, &options);
        RepositoryUrlCheck::new().run(&ctx)
    }

    #[test]
    fn absent_repository_passes() {
        assert!(run_check(None).is_empty());
        assert!(run_check(Some("  ")).is_empty());
    }

    #[test]
    fn https_known_host_passes() {
        assert!(run_check(Some("https://github.com/team-alpha/project")).is_empty());
        assert!(run_check(Some("https://gitlab.com/team-alpha/project")).is_empty());
    }

    #[test]
    fn problems_are_warnings() {
        for url in [
            "http://github.com/team-alpha/project",
            "github.com/team-alpha/project",
            "https://example.com/project",
            "project",
        ] {
            let violations = run_check(Some(url));
            assert_eq!(violations.len(), 1, "{}", url);
            assert_eq!(violations[0].severity(), Severity::Warning);
        }
    }
}
