//! Random registration comment generation for benchmarking and testing.
//!
//! Produces issue threads mixing well-formed registrations in the
//! supported template styles with casual replies, broken submissions and
//! repeated team names.

use crate::fetch::IssueComment;
use chrono::{DateTime, Duration, Utc};
use rand::prelude::*;
use rand::rngs::StdRng;
use std::fmt::Write;

/// Configuration for generating comment threads.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of comments to generate.
    pub num_comments: usize,
    /// Largest team generated (at least 1).
    pub max_members: usize,
    /// Percentage of comments that are casual replies.
    pub casual_percent: u32,
    /// Percentage of registrations with a broken member entry.
    pub malformed_percent: u32,
    /// Percentage of registrations reusing an earlier team name.
    pub duplicate_percent: u32,
    /// Seed for deterministic generation.
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_comments: 100,
            max_members: 5,
            casual_percent: 20,
            malformed_percent: 5,
            duplicate_percent: 5,
            seed: 42,
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with the given number of comments.
    pub fn new(num_comments: usize) -> Self {
        Self {
            num_comments,
            ..Default::default()
        }
    }

    /// Small fixture (~10 comments).
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Medium fixture (~100 comments).
    pub fn medium() -> Self {
        Self::new(100)
    }

    /// Large fixture (~1000 comments).
    pub fn large() -> Self {
        Self::new(1_000)
    }

    /// Extra large fixture (~10k comments).
    pub fn xlarge() -> Self {
        Self::new(10_000)
    }

    /// Set the random seed for deterministic generation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the largest team size.
    pub fn with_max_members(mut self, max: usize) -> Self {
        self.max_members = max.max(1);
        self
    }

    /// Only generate well-formed, uniquely named registrations.
    pub fn clean(mut self) -> Self {
        self.casual_percent = 0;
        self.malformed_percent = 0;
        self.duplicate_percent = 0;
        self
    }
}

/// Vocabulary for realistic names and replies.
mod vocabulary {
    pub const TEAM_ADJECTIVES: &[&str] = &["Swift", "Bright", "Quiet", "Rapid", "Crimson", "Silver"];
    pub const TEAM_NOUNS: &[&str] = &["Falcons", "Otters", "Comets", "Pandas", "Rivers", "Lanterns"];
    pub const GIVEN_NAMES: &[&str] = &["张三", "李四", "王五", "Alice", "Bob", "Chen Wei", "Dana"];
    pub const ACCOUNTS: &[&str] = &["zhangsan", "lisi", "wangwu", "alice", "bob", "chenwei", "dana"];
    pub const REPLIES: &[&str] = &[
        "这是一个普通的评论",
        "Thanks, looking forward to it!",
        "+1",
        "When is the deadline?",
        "> **团队名称：** quoted\n\nSee the template above.",
    ];
}

/// Layout used to write a registration.
#[derive(Debug, Clone, Copy)]
enum Style {
    ChineseTable,
    EnglishBullets,
    Inline,
}

/// A member as generated: display name and account.
type GeneratedMember = (String, String);

fn write_registration(
    out: &mut String,
    style: Style,
    team_name: &str,
    members: &[GeneratedMember],
    reference: &str,
) {
    // Writing to a String cannot fail.
    match style {
        Style::ChineseTable => {
            let _ = writeln!(out, "## 团队信息提交\n");
            let _ = writeln!(out, "**团队名称：** {}\n", team_name);
            let _ = writeln!(out, "**团队成员信息：**");
            let _ = writeln!(out, "| 成员姓名 | 个人 GitHub ID | 个人 GitHub 链接 |");
            let _ = writeln!(out, "|----------|----------------|------------------|");
            for (name, account) in members {
                let _ = writeln!(
                    out,
                    "| {} | {} | https://github.com/{} |",
                    name, account, account
                );
            }
            let _ = writeln!(out, "\n**团队 GitHub 账户：** {}", reference);
            let _ = writeln!(out, "**提交时间：** 2025-01-15");
        }
        Style::EnglishBullets => {
            let _ = writeln!(out, "Team Name: {}", team_name);
            let _ = writeln!(out, "Members:");
            for (name, account) in members {
                let _ = writeln!(out, "- {} (@{})", name, account);
            }
            let _ = writeln!(out, "Team Account: https://github.com/{}", reference);
        }
        Style::Inline => {
            let _ = writeln!(out, "**Team Name:** {}", team_name);
            let entries: Vec<String> = members
                .iter()
                .map(|(name, account)| format!("{} ({})", name, account))
                .collect();
            let _ = writeln!(out, "**Members:** {}", entries.join(", "));
            let _ = writeln!(out, "**Team Account:** @{}", reference);
        }
    }
}

/// Generates the body of a single registration comment.
fn generate_registration(
    rng: &mut StdRng,
    config: &GeneratorConfig,
    index: usize,
    used_names: &mut Vec<String>,
) -> String {
    use vocabulary::*;

    let team_name = if !used_names.is_empty() && rng.random_ratio(config.duplicate_percent, 100) {
        used_names[rng.random_range(0..used_names.len())].clone()
    } else {
        let adjective = TEAM_ADJECTIVES[rng.random_range(0..TEAM_ADJECTIVES.len())];
        let noun = TEAM_NOUNS[rng.random_range(0..TEAM_NOUNS.len())];
        // The index keeps generated names unique
        let name = format!("{} {} {}", adjective, noun, index);
        used_names.push(name.clone());
        name
    };

    let size = rng.random_range(1..=config.max_members.max(1));
    let mut members: Vec<GeneratedMember> = (0..size)
        .map(|i| {
            let pick = rng.random_range(0..GIVEN_NAMES.len());
            (
                GIVEN_NAMES[pick].to_string(),
                format!("{}{}x{}", ACCOUNTS[pick], index, i),
            )
        })
        .collect();

    let style = match rng.random_range(0..3) {
        0 => Style::ChineseTable,
        1 => Style::EnglishBullets,
        _ => Style::Inline,
    };

    if rng.random_ratio(config.malformed_percent, 100) {
        // A member with a name but no account
        members.push(("Nameless Member".to_string(), String::new()));
    }

    let reference = format!("team-{}", index);
    let mut body = String::new();
    write_registration(&mut body, style, &team_name, &members, &reference);
    body
}

/// Generates a thread of issue comments.
///
/// Comment IDs start at 1 and timestamps advance one minute per comment.
pub fn generate_comments(config: &GeneratorConfig) -> Vec<IssueComment> {
    use vocabulary::*;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut used_names = Vec::new();
    let start = DateTime::<Utc>::from_timestamp(1_736_899_200, 0).unwrap_or_default();

    (0..config.num_comments)
        .map(|index| {
            let body = if rng.random_ratio(config.casual_percent, 100) {
                REPLIES[rng.random_range(0..REPLIES.len())].to_string()
            } else {
                generate_registration(&mut rng, config, index, &mut used_names)
            };
            let author = ACCOUNTS[index % ACCOUNTS.len()];
            let created_at = start + Duration::minutes(index as i64);
            IssueComment::new(index as u64 + 1, author, created_at, body)
        })
        .collect()
}

/// Generates a thread and joins the bodies, for parser throughput tests.
pub fn generate(config: &GeneratorConfig) -> String {
    generate_comments(config)
        .into_iter()
        .map(|comment| comment.body)
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::parse_comments;
    use crate::validate::{ValidationOptions, validate};

    #[test]
    fn clean_threads_parse_and_validate() {
        let comments = generate_comments(&GeneratorConfig::medium().clean());
        let collection = parse_comments(&comments);

        assert!(collection.skipped.is_empty(), "{:?}", collection.skipped);
        assert_eq!(collection.records.len(), 100);

        let outcome = validate(collection.records, &ValidationOptions::new());
        assert!(outcome.is_ok(), "{:?}", outcome.invalid);
    }

    #[test]
    fn noisy_threads_have_skips() {
        let config = GeneratorConfig::large();
        let collection = parse_comments(&generate_comments(&config));

        assert_eq!(collection.comment_count(), 1_000);
        assert!(!collection.skipped.is_empty());
        assert!(collection.failed_registrations().count() > 0);
        assert!(collection.records.len() > 500);
    }

    #[test]
    fn member_count_respects_max() {
        let config = GeneratorConfig::medium().clean().with_max_members(3);
        let collection = parse_comments(&generate_comments(&config));
        assert!(collection.records.iter().all(|r| (1..=3).contains(&r.members.len())));
    }

    #[test]
    fn deterministic_generation() {
        let config = GeneratorConfig::medium();
        assert_eq!(generate(&config), generate(&config));
    }

    #[test]
    fn different_seeds_differ() {
        let content1 = generate(&GeneratorConfig::medium().with_seed(1));
        let content2 = generate(&GeneratorConfig::medium().with_seed(2));
        assert_ne!(content1, content2);
    }

    #[test]
    fn zero_comments() {
        assert!(generate_comments(&GeneratorConfig::new(0)).is_empty());
    }

    #[test]
    fn with_max_members_minimum() {
        let config = GeneratorConfig::default().with_max_members(0);
        assert_eq!(config.max_members, 1);
    }
}
