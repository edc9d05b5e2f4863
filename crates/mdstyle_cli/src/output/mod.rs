//! Output formatting module

mod json;
mod text;

use mdstyle_core::LintResult;
use miette::Result;

use crate::cli::OutputFormat;

/// Prints results; returns true if any document has violations.
pub fn output_results(results: &[LintResult], format: OutputFormat) -> Result<bool> {
    let has_violations = results.iter().any(|r| r.has_violations());

    match format {
        OutputFormat::Json => json::output_json(results)?,
        OutputFormat::Text => text::output_text(results),
    }

    Ok(has_violations)
}
