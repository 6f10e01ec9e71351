//! Configuration handling for the CLI.
//!
//! This module converts CLI arguments into the library's configuration types
//! and handles GitHub authentication setup.

use crate::cli::{Args, DEFAULT_GITHUB_BASE_URL};
use jsonwebtoken::EncodingKey;
use octocrab::Octocrab;
use octocrab::models::{AppId, InstallationId};
use std::path::PathBuf;
use team_registry_core::{ExportFormat, ExportTarget, MemberBounds, RepoId, ValidationOptions};
use thiserror::Error;

/// Errors that can occur during configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required configuration.
    #[error("missing required configuration: {0}")]
    MissingRequired(String),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// GitHub authentication error.
    #[error("GitHub authentication error: {0}")]
    GitHubAuth(String),
}

/// Application exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// The run completed.
    Success = 0,
    /// Configuration, fetching or export failed.
    Failure = 1,
    /// Application terminated by signal (SIGINT/SIGTERM).
    Terminated = 2,
    /// Records were rejected and `--strict` was given.
    RejectedRecords = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

/// Validated and processed configuration for a collection run.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Repository holding the registration issue.
    pub repo: RepoId,
    /// Issue number.
    pub issue: u64,
    /// Options handed to the validator.
    pub validation: ValidationOptions,
    /// Report formats, deduplicated, in the order given.
    pub formats: Vec<ExportFormat>,
    /// Directory reports are written to.
    pub output_dir: PathBuf,
    /// File name stem of the reports.
    pub output_stem: String,
    /// Whether report names carry a timestamp.
    pub timestamped: bool,
    /// Whether rejected records change the exit code.
    pub strict: bool,
    /// Whether to output JSON.
    pub json_output: bool,
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let repo = args
            .repo
            .parse::<RepoId>()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        let bounds = MemberBounds::new(args.min_members, args.max_members)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        let validation = ValidationOptions::new()
            .with_member_bounds(bounds)
            .with_allow_duplicate_team_names(args.allow_duplicate_team_names)
            .with_skip_validation(args.no_validate);

        let mut formats: Vec<ExportFormat> = Vec::new();
        for format in args.effective_formats().into_iter().map(ExportFormat::from) {
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        if formats.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one report format is required".to_string(),
            ));
        }

        let output_stem = args.output.trim().to_string();
        if output_stem.is_empty() {
            return Err(ConfigError::Invalid("output name cannot be empty".to_string()));
        }
        if output_stem.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(format!(
                "output name '{}' cannot contain path separators (use --output-dir)",
                output_stem
            )));
        }

        validate_github_auth(args)?;

        Ok(Self {
            repo,
            issue: args.issue,
            validation,
            formats,
            output_dir: args.output_dir.clone(),
            output_stem,
            timestamped: !args.no_timestamp,
            strict: args.strict,
            json_output: args.json,
        })
    }

    /// Returns where reports for this run are written.
    pub fn export_target(&self) -> ExportTarget {
        if self.timestamped {
            ExportTarget::timestamped(&self.output_dir, &self.output_stem)
        } else {
            ExportTarget::new(&self.output_dir, &self.output_stem)
        }
    }

    /// Determines the exit code from the number of rejected records.
    pub fn exit_code_for_outcome(&self, rejected: usize) -> ExitCode {
        if self.strict && rejected > 0 {
            ExitCode::RejectedRecords
        } else {
            ExitCode::Success
        }
    }
}

/// Checks that exactly one usable authentication method is configured.
fn validate_github_auth(args: &Args) -> Result<(), ConfigError> {
    if args.has_any_github_app_setting() && !args.has_github_app_auth() {
        return Err(ConfigError::GitHubAuth(
            "GitHub App authentication requires GITHUB_APP_ID, GITHUB_APP_INSTALLATION_ID and GITHUB_APP_PRIVATE_KEY"
                .to_string(),
        ));
    }

    if !args.has_github_auth() {
        return Err(ConfigError::MissingRequired(
            "GITHUB_TOKEN or GitHub App credentials are required to read issue comments"
                .to_string(),
        ));
    }

    Ok(())
}

/// Creates an authenticated Octocrab client from CLI arguments.
pub fn create_octocrab(args: &Args) -> Result<Octocrab, ConfigError> {
    let base_url = if args.github_base_url != DEFAULT_GITHUB_BASE_URL {
        Some(args.github_base_url.as_str())
    } else {
        None
    };

    match (
        args.github_app_id,
        args.github_app_installation_id,
        args.github_app_private_key.as_ref(),
        args.github_access_token.as_ref(),
    ) {
        (Some(app_id), Some(installation_id), Some(private_key), _) => {
            let key = EncodingKey::from_rsa_pem(private_key.as_bytes())
                .map_err(|e| ConfigError::GitHubAuth(format!("invalid private key: {}", e)))?;

            let mut app_builder = Octocrab::builder().app(AppId(app_id), key);
            if let Some(url) = base_url {
                app_builder = app_builder
                    .base_uri(url)
                    .map_err(|e| ConfigError::GitHubAuth(format!("invalid base URL: {}", e)))?;
            }
            let app_client = app_builder.build().map_err(|e| {
                ConfigError::GitHubAuth(format!("failed to create app client: {}", e))
            })?;

            app_client
                .installation(InstallationId(installation_id))
                .map_err(|e| {
                    ConfigError::GitHubAuth(format!("failed to get installation client: {}", e))
                })
        }
        (_, _, _, Some(token)) => {
            let mut builder = Octocrab::builder();
            if let Some(url) = base_url {
                builder = builder
                    .base_uri(url)
                    .map_err(|e| ConfigError::GitHubAuth(format!("invalid base URL: {}", e)))?;
            }
            builder
                .personal_token(token.clone())
                .build()
                .map_err(|e| ConfigError::GitHubAuth(format!("failed to build client: {}", e)))
        }
        _ => Err(ConfigError::MissingRequired(
            "GITHUB_TOKEN or GitHub App credentials are required to read issue comments"
                .to_string(),
        )),
    }
}
