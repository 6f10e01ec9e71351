//! Team Registry Core
//!
//! A library for collecting team registrations posted as GitHub issue
//! comments, validating them and exporting the accepted teams.
//!
//! # Features
//!
//! - **Parser**: Read the registration template (Chinese or English labels,
//!   Markdown tables or bullet lists) into structured records
//! - **Validation**: Detect duplicate team names, out-of-range team sizes
//!   and malformed account references
//! - **Export**: Write accepted records as CSV and JSON reports
//!
//! # Quick Start
//!
//! ```rust
//! use chrono::{DateTime, Utc};
//! use team_registry_core::collect::parse_comments;
//! use team_registry_core::export::{ExportFormat, ExportTarget, export};
//! use team_registry_core::fetch::IssueComment;
//! use team_registry_core::validate::{ValidationOptions, validate};
//!
//! let comments = vec![
//!     IssueComment::new(
//!         1,
//!         "ann",
//!         DateTime::<Utc>::UNIX_EPOCH,
//!         "Team Name: Alpha\nMembers:\n- Ann (ann)\n- Bo (bo)\nTeam Account: github.com/alpha-team\n",
//!     ),
//!     IssueComment::new(2, "bo", DateTime::<Utc>::UNIX_EPOCH, "Great, see you there!"),
//! ];
//!
//! // Parse every comment; casual replies are skipped
//! let collection = parse_comments(&comments);
//! assert_eq!(collection.records.len(), 1);
//!
//! // Validate the batch
//! let outcome = validate(collection.records, &ValidationOptions::new());
//!
//! if outcome.is_ok() {
//!     let dir = std::env::temp_dir().join("team-registry-doc");
//!     let target = ExportTarget::new(&dir, "team_info");
//!     let report = export(&outcome.valid, &target, &ExportFormat::ALL);
//!     for (format, path) in report.written() {
//!         println!("{} report: {}", format, path.display());
//!     }
//! } else {
//!     for result in &outcome.invalid {
//!         for violation in &result.violations {
//!             eprintln!("{}: {}", result.record.team_name, violation);
//!         }
//!     }
//! }
//! ```
//!
//! # Modules
//!
//! - [`fetch`]: Comment source abstraction and repository identifiers
//! - [`parse`]: Registration template parser
//! - [`collect`]: Fetch-and-parse pipeline
//! - [`validate`]: Validation rules for parsed records
//! - [`export`]: CSV and JSON report writers

pub mod collect;
pub mod export;
pub mod fetch;
#[cfg(feature = "generate")]
pub mod generate;
pub mod parse;
pub mod validate;

// Re-export commonly used types at the crate root
pub use collect::{Collection, SkippedComment, collect_registrations, parse_comments};
pub use export::{ExportFormat, ExportReport, ExportTarget, export};
pub use fetch::{CommentSource, FetchError, IssueComment, RepoId};
pub use parse::{Member, ParseFailure, TeamRecord, parse_comment, parse_registration};
pub use validate::checks::{Check, CheckContext, CheckRunner};
pub use validate::{MemberBounds, ValidationOptions, ValidationOutcome, Violation, validate};
