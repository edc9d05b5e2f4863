//! Lint command implementation

use mdstyle_core::{Linter, LinterConfig};
use miette::{IntoDiagnostic, Result};
use tracing::info;

use crate::cli::{Cli, OutputFormat};
use crate::output::output_results;

/// Lints `patterns`; returns true when any violation or file failure was
/// reported.
pub fn run_lint(cli: &Cli, patterns: &[String], format: OutputFormat) -> Result<bool> {
    let mut config = match &cli.config {
        Some(path) => LinterConfig::from_file(path).into_diagnostic()?,
        None => find_config()?,
    };

    if let Some(style) = &cli.style {
        info!("Applying style script: {}", style.display());
        config = config.with_style_script(style);
    }

    let linter = Linter::new(config).into_diagnostic()?;
    let report = linter.lint_patterns(patterns).into_diagnostic()?;

    if !report.failures.is_empty() {
        eprintln!("\n{} file(s) failed to lint:", report.failures.len());
        for (path, error) in &report.failures {
            eprintln!("  {}: {}", path.display(), error);
        }
    }

    let has_violations = output_results(&report.results, format)?;

    Ok(has_violations || !report.failures.is_empty())
}

fn find_config() -> Result<LinterConfig> {
    if let Some(path) = LinterConfig::discover(".") {
        info!("Using config: {}", path.display());
        return LinterConfig::from_file(&path).into_diagnostic();
    }

    info!("No config file found, using defaults");
    Ok(LinterConfig::new())
}
