//! Generate registration comment threads for benchmarking.
//!
//! Usage: cargo run --release --bin generate-fixtures --features generate -- [output_dir]
//!
//! Writes each preset twice: `{name}.json` holds the comments as a JSON
//! array, `{name}.md` holds the bodies as one Markdown thread.

use std::{fs, io, path::Path, path::PathBuf, process::ExitCode};
use team_registry_core::generate::{GeneratorConfig, generate, generate_comments};

/// Type alias for fixture preset entries.
type PresetEntry = (&'static str, fn() -> GeneratorConfig);

/// Fixture presets - keep in sync with benches/fixtures.rs
const PRESETS: &[PresetEntry] = &[
    ("small", GeneratorConfig::small),
    ("medium", GeneratorConfig::medium),
    ("large", GeneratorConfig::large),
    ("xlarge", GeneratorConfig::xlarge),
];

fn main() -> ExitCode {
    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("benches/fixtures"));

    if let Err(e) = run(&output_dir) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(output_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(output_dir)?;

    for (name, config_fn) in PRESETS {
        let config = config_fn();

        let comments = generate_comments(&config);
        let json = serde_json::to_string_pretty(&comments).map_err(io::Error::other)?;
        let json_path = output_dir.join(format!("{name}.json"));
        fs::write(&json_path, json)?;

        let thread = generate(&config);
        let md_path = output_dir.join(format!("{name}.md"));
        fs::write(&md_path, &thread)?;

        println!(
            "Generated {} and {} ({} comments, {} bytes)",
            json_path.display(),
            md_path.display(),
            comments.len(),
            thread.len()
        );
    }

    Ok(())
}
