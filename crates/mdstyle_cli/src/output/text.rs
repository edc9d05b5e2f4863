//! Text output formatter

use mdstyle_core::{LintResult, Registry, Violation};

pub fn output_text(results: &[LintResult]) {
    for result in results {
        let path = result.path.display().to_string();
        for violation in &result.violations {
            println!("{}", format_violation(&path, violation));
        }
    }

    let total_files = results.len();
    let total_issues: usize = results.iter().map(|r| r.violations.len()).sum();

    println!();
    println!(
        "Checked {} files, found {} issues",
        total_files, total_issues
    );
}

/// `path:line[:col] CODE/name message`
fn format_violation(path: &str, violation: &Violation) -> String {
    let location = match violation.column {
        Some(column) => format!("{}:{}:{}", path, violation.line, column),
        None => format!("{}:{}", path, violation.line),
    };
    let rule = match Registry::builtin().lookup(&violation.rule) {
        Ok(rule) => format!("{}/{}", rule.code(), rule.meta().name),
        Err(_) => violation.rule.clone(),
    };
    let prefix = if violation.is_fault() { "[rule fault] " } else { "" };

    format!("{} {} {}{}", location, rule, prefix, violation.message)
}
