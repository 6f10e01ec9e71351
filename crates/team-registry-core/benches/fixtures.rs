//! Benchmark fixtures - generated at runtime.
//!
//! Fixtures are generated lazily on first access and cached for the
//! duration of the benchmark run. All generation is deterministic.

use std::sync::LazyLock;
use team_registry_core::IssueComment;
use team_registry_core::generate::{GeneratorConfig, generate_comments};

// Lazily generated comment threads (deterministic via default seed)
static SMALL: LazyLock<Vec<IssueComment>> =
    LazyLock::new(|| generate_comments(&GeneratorConfig::small()));
static MEDIUM: LazyLock<Vec<IssueComment>> =
    LazyLock::new(|| generate_comments(&GeneratorConfig::medium()));
static LARGE: LazyLock<Vec<IssueComment>> =
    LazyLock::new(|| generate_comments(&GeneratorConfig::large()));
static XLARGE: LazyLock<Vec<IssueComment>> =
    LazyLock::new(|| generate_comments(&GeneratorConfig::xlarge()));

/// Standard fixtures for regular benchmarks.
pub fn fixtures() -> &'static [(&'static str, &'static [IssueComment])] {
    static FIXTURES: LazyLock<Vec<(&'static str, &'static [IssueComment])>> =
        LazyLock::new(|| {
            vec![
                ("small", SMALL.as_slice()),
                ("medium", MEDIUM.as_slice()),
                ("large", LARGE.as_slice()),
            ]
        });
    FIXTURES.as_slice()
}

/// Extended fixtures including a 10k comment thread.
pub fn fixtures_extended() -> &'static [(&'static str, &'static [IssueComment])] {
    static FIXTURES: LazyLock<Vec<(&'static str, &'static [IssueComment])>> =
        LazyLock::new(|| {
            vec![
                ("small", SMALL.as_slice()),
                ("medium", MEDIUM.as_slice()),
                ("large", LARGE.as_slice()),
                ("xlarge", XLARGE.as_slice()),
            ]
        });
    FIXTURES.as_slice()
}

/// Total body size of a thread in bytes.
pub fn thread_bytes(comments: &[IssueComment]) -> u64 {
    comments.iter().map(|c| c.body.len() as u64).sum()
}
