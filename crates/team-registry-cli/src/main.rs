//! Team Registry CLI
//!
//! A command-line tool that collects team registrations from the comments
//! of a GitHub issue and exports them as CSV and JSON reports.

use clap::Parser;
use std::io::{self, IsTerminal};
use std::process::ExitCode as StdExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::signal;
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Args;
use cli::config::{ExitCode, ValidatedConfig, create_octocrab};
use cli::github::OctocrabClient;
use cli::output::{HumanOutput, RecordLabel, RunReport};
use team_registry_core::{Collection, collect_registrations, export, validate};

#[tokio::main]
async fn main() -> StdExitCode {
    // Parse command-line arguments
    let args = Args::parse();

    // Initialize tracing
    init_tracing(args.verbose, args.json);

    // Set up signal handling for graceful shutdown
    let terminated = Arc::new(AtomicBool::new(false));
    let terminated_clone = terminated.clone();

    tokio::spawn(async move {
        let ctrl_c = signal::ctrl_c();
        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(e) => {
                    warn!("Failed to install SIGTERM handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };
        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                info!("Received SIGINT, shutting down...");
            }
            _ = terminate => {
                info!("Received SIGTERM, shutting down...");
            }
        }

        terminated_clone.store(true, Ordering::SeqCst);
    });

    let exit_code = run(args, &terminated).await;

    // Check if we were terminated by signal
    if terminated.load(Ordering::SeqCst) {
        return StdExitCode::from(ExitCode::Terminated as u8);
    }

    StdExitCode::from(i32::from(exit_code) as u8)
}

/// Initialize tracing based on verbosity level.
fn init_tracing(verbosity: u8, json_output: bool) {
    // Don't output logs when using JSON output mode
    if json_output {
        return;
    }

    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let mut filter = EnvFilter::from_default_env().add_directive(level.into());
    for directive in ["octocrab=warn", "hyper=warn", "reqwest=warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

/// Run a collection with the given arguments.
async fn run(args: Args, terminated: &AtomicBool) -> ExitCode {
    let mut stdout = io::stdout().lock();

    // Validate configuration
    let config = match ValidatedConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            write_error(&e.to_string(), !args.json);
            return ExitCode::Failure;
        }
    };

    let use_colors = !config.json_output && io::stdout().is_terminal();

    debug!("Validated configuration: {:?}", config);
    info!("Reading registrations from {}#{}", config.repo, config.issue);

    let client = match create_octocrab(&args) {
        Ok(client) => OctocrabClient::new(client),
        Err(e) => {
            write_error(&e.to_string(), !config.json_output);
            return ExitCode::Failure;
        }
    };

    let collection = match collect_registrations(&client, &config.repo, config.issue).await {
        Ok(collection) => collection,
        Err(e) => {
            error!("Fetching comments failed ({})", e.code());
            write_error(&e.to_string(), !config.json_output);
            return ExitCode::Failure;
        }
    };

    // Check for termination
    if terminated.load(Ordering::SeqCst) {
        return ExitCode::Terminated;
    }

    let comments = collection.comment_count();
    let Collection { records, skipped } = collection;
    for failed in skipped.iter().filter(|s| s.failure.is_registration_attempt()) {
        warn!(
            "Comment {} by @{} is not a complete registration: {}",
            failed.comment_id, failed.author, failed.failure
        );
    }

    let labels: Vec<RecordLabel> = records.iter().map(RecordLabel::from).collect();
    let outcome = validate(records, &config.validation);

    if terminated.load(Ordering::SeqCst) {
        return ExitCode::Terminated;
    }

    let export_report = if outcome.valid.is_empty() {
        warn!("No valid team records, skipping export");
        None
    } else {
        let target = config.export_target();
        Some(export(&outcome.valid, &target, &config.formats))
    };

    let report = RunReport {
        repo: &config.repo,
        issue: config.issue,
        comments,
        skipped: &skipped,
        labels: &labels,
        outcome: &outcome,
        export: export_report.as_ref(),
    };

    // Output results
    let written = if config.json_output {
        report.write_json(&mut stdout)
    } else {
        report.write_human(&mut stdout, use_colors)
    };
    if let Err(e) = written {
        error!("Failed to write output: {}", e);
        return ExitCode::Failure;
    }

    if let Some(report) = &export_report {
        if !report.is_ok() {
            for (format, e) in report.failures() {
                error!("Writing {} report failed: {}", format, e);
            }
            return ExitCode::Failure;
        }
    }

    config.exit_code_for_outcome(outcome.invalid.len())
}

/// Write an error message to stderr.
fn write_error(message: &str, allow_colors: bool) {
    let stderr = io::stderr();
    let use_colors = allow_colors && stderr.is_terminal();
    let mut output = HumanOutput::new(stderr.lock(), use_colors);
    let _ = output.write_error(message);
}
