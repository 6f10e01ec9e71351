//! CLI module for the team registry collector.
//!
//! This module provides command-line argument parsing using Clap with
//! environment variable support.

pub mod config;
pub mod github;
pub mod output;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use team_registry_core::ExportFormat;

/// Default GitHub API endpoint.
pub const DEFAULT_GITHUB_BASE_URL: &str = "https://api.github.com/";

/// Team registration collector - reads team registrations from the
/// comments of a GitHub issue, validates them and exports CSV/JSON reports.
#[derive(Parser, Debug)]
#[command(name = "team-registry")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Repository holding the registration issue, in 'owner/name' format.
    #[arg(long, env = "TEAM_REGISTRY_REPO")]
    pub repo: String,

    /// Number of the issue whose comments hold the registrations.
    #[arg(long, env = "TEAM_REGISTRY_ISSUE")]
    pub issue: u64,

    /// GitHub personal access token.
    #[arg(long, env = "GITHUB_TOKEN")]
    pub github_access_token: Option<String>,

    /// GitHub base URL for API requests (for GitHub Enterprise).
    #[arg(long, env = "GITHUB_BASE_URL", default_value = DEFAULT_GITHUB_BASE_URL)]
    pub github_base_url: String,

    /// GitHub App ID for authentication (alternative to access token).
    #[arg(long, env = "GITHUB_APP_ID")]
    pub github_app_id: Option<u64>,

    /// GitHub App Installation ID (required when using App authentication).
    #[arg(long, env = "GITHUB_APP_INSTALLATION_ID")]
    pub github_app_installation_id: Option<u64>,

    /// GitHub App private key in PEM format (required when using App authentication).
    #[arg(long, env = "GITHUB_APP_PRIVATE_KEY")]
    pub github_app_private_key: Option<String>,

    /// File name stem for the exported reports.
    #[arg(long, env = "TEAM_REGISTRY_OUTPUT", default_value = "team_info")]
    pub output: String,

    /// Directory the reports are written to (created if missing).
    #[arg(long, env = "TEAM_REGISTRY_OUTPUT_DIR", default_value = "data")]
    pub output_dir: PathBuf,

    /// Smallest accepted team size (default 1).
    #[arg(long)]
    pub min_members: Option<usize>,

    /// Largest accepted team size (default unbounded).
    #[arg(long)]
    pub max_members: Option<usize>,

    /// Accept several teams with the same name.
    #[arg(long)]
    pub allow_duplicate_team_names: bool,

    /// Skip validation and export every parsed record.
    #[arg(long)]
    pub no_validate: bool,

    /// Comma-separated list of report formats.
    /// Possible values: csv, json
    #[arg(long, env = "TEAM_REGISTRY_FORMATS", value_delimiter = ',')]
    pub formats: Option<Vec<FormatKind>>,

    /// Name reports '{output}.{ext}' instead of '{output}_{timestamp}.{ext}'.
    #[arg(long)]
    pub no_timestamp: bool,

    /// Exit with code 3 when any record is rejected by validation.
    #[arg(long)]
    pub strict: bool,

    /// Output the run summary as JSON instead of human-readable format.
    #[arg(long, short = 'j')]
    pub json: bool,

    /// Increase verbosity level (-v for info, -vv for debug, -vvv for trace).
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Report formats selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FormatKind {
    /// Comma-separated values.
    Csv,
    /// A JSON array of records.
    Json,
}

impl FormatKind {
    /// Returns all formats.
    pub fn all() -> Vec<Self> {
        vec![Self::Csv, Self::Json]
    }
}

impl From<FormatKind> for ExportFormat {
    fn from(kind: FormatKind) -> Self {
        match kind {
            FormatKind::Csv => ExportFormat::Csv,
            FormatKind::Json => ExportFormat::Json,
        }
    }
}

impl Args {
    /// Returns the formats to write, defaulting to all.
    pub fn effective_formats(&self) -> Vec<FormatKind> {
        self.formats.clone().unwrap_or_else(FormatKind::all)
    }

    /// Returns true if any GitHub App credential is set.
    pub fn has_any_github_app_setting(&self) -> bool {
        self.github_app_id.is_some()
            || self.github_app_installation_id.is_some()
            || self.github_app_private_key.is_some()
    }

    /// Returns true if GitHub App authentication is configured.
    pub fn has_github_app_auth(&self) -> bool {
        self.github_app_id.is_some()
            && self.github_app_installation_id.is_some()
            && self.github_app_private_key.is_some()
    }

    /// Returns true if GitHub authentication is configured.
    pub fn has_github_auth(&self) -> bool {
        self.github_access_token.is_some() || self.has_github_app_auth()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Parses arguments with the required flags filled in.
    pub(crate) fn parse_args(extra: &[&str]) -> Args {
        let mut argv = vec!["team-registry", "--repo", "course/registrations", "--issue", "1"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let args = parse_args(&[]);
        assert_eq!(args.repo, "course/registrations");
        assert_eq!(args.issue, 1);
        assert_eq!(args.output, "team_info");
        assert_eq!(args.output_dir, PathBuf::from("data"));
        assert_eq!(args.github_base_url, DEFAULT_GITHUB_BASE_URL);
        assert_eq!(args.min_members, None);
        assert_eq!(args.max_members, None);
        assert!(!args.allow_duplicate_team_names);
        assert!(!args.no_validate);
        assert!(!args.no_timestamp);
        assert!(!args.strict);
    }

    #[test]
    fn test_default_formats() {
        let args = parse_args(&[]);
        assert_eq!(args.effective_formats(), vec![FormatKind::Csv, FormatKind::Json]);
    }

    #[test]
    fn test_specific_formats() {
        let args = parse_args(&["--formats", "json"]);
        assert_eq!(args.effective_formats(), vec![FormatKind::Json]);

        let args = parse_args(&["--formats", "json,csv"]);
        assert_eq!(args.effective_formats(), vec![FormatKind::Json, FormatKind::Csv]);
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result = Args::try_parse_from([
            "team-registry",
            "--repo",
            "a/b",
            "--issue",
            "1",
            "--formats",
            "html",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_repo_and_issue_required() {
        assert!(Args::try_parse_from(["team-registry", "--issue", "1"]).is_err());
        assert!(Args::try_parse_from(["team-registry", "--repo", "a/b"]).is_err());
    }

    #[test]
    fn test_member_bounds_flags() {
        let args = parse_args(&["--min-members", "2", "--max-members", "5"]);
        assert_eq!(args.min_members, Some(2));
        assert_eq!(args.max_members, Some(5));
    }

    #[test]
    fn test_json_output_flag() {
        let args = parse_args(&["--json"]);
        assert!(args.json);

        let args = parse_args(&["-j"]);
        assert!(args.json);
    }

    #[test]
    fn test_verbose_flag() {
        assert_eq!(parse_args(&[]).verbose, 0);
        assert_eq!(parse_args(&["-v"]).verbose, 1);
        assert_eq!(parse_args(&["-vv"]).verbose, 2);
    }

    #[test]
    fn test_github_auth_detection() {
        let mut args = parse_args(&[]);
        args.github_access_token = None;
        assert!(!args.has_github_auth());

        let args = parse_args(&["--github-access-token", "ghp_test"]);
        assert!(args.has_github_auth());
        assert!(!args.has_github_app_auth());

        let args = parse_args(&["--github-app-id", "1"]);
        assert!(!args.has_github_auth());
        assert!(args.has_any_github_app_setting());
    }
}
