//! Integration tests for corpus linting.
//!
//! These tests drive the linter the way the CLI does: a config file on
//! disk, a style script next to it, and a directory of documents.

use std::fs;
use std::path::{Path, PathBuf};

use mdstyle_core::{DirectiveOrigin, LinterConfig, Linter, LinterError, ViolationKind};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const STYLE: &str = "all\nrule 'MD013', :line_length => 100, :code_blocks => false\nrule 'MD009', :br_spaces => 2\nexclude_rule 'MD012'\n";

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

fn styled_linter(temp: &TempDir) -> Linter {
    write(temp.path(), ".mdl.rb", STYLE);
    let config_path = write(temp.path(), ".mdstyle.jsonc", r#"{ "style": ".mdl.rb" }"#);
    let config = LinterConfig::from_file(config_path).expect("Failed to load config");
    Linter::new(config).expect("Failed to create linter")
}

#[test]
fn test_lint_empty_file_list() {
    let temp = TempDir::new().unwrap();
    let report = styled_linter(&temp).lint_files(&[]);
    assert!(report.results.is_empty());
    assert!(report.failures.is_empty());
    assert!(report.skipped.is_empty());
}

#[test]
fn test_results_keep_input_order() {
    let temp = TempDir::new().unwrap();
    let linter = styled_linter(&temp);

    let files: Vec<PathBuf> = (0..20)
        .rev()
        .map(|i| write(temp.path(), &format!("doc{:02}.md", i), "# Doc\n\nBody.\n"))
        .collect();

    let report = linter.lint_files(&files);
    let paths: Vec<PathBuf> = report.results.iter().map(|r| r.path.clone()).collect();
    assert_eq!(paths, files);
    assert!(!report.has_violations());
}

#[test]
fn test_failures_do_not_abort_run() {
    let temp = TempDir::new().unwrap();
    let linter = styled_linter(&temp);

    let good = write(temp.path(), "good.md", "# Good\n");
    let missing = temp.path().join("missing.md");

    let report = linter.lint_files(&[missing.clone(), good.clone()]);
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].path, good);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, missing);
    assert!(matches!(report.failures[0].1, LinterError::File(_)));
}

#[test]
fn test_sample_style_applies_to_documents() {
    let temp = TempDir::new().unwrap();
    let linter = styled_linter(&temp);

    let long = "x".repeat(101);
    let source = format!(
        "# Notes\n\n{long}\n\nBreak here  \nOne space \n\n\n\n\n```text\n{long}\n```\n"
    );
    let doc = write(temp.path(), "notes.md", &source);

    let report = linter.lint_files(&[doc]);
    let codes: Vec<(u32, &str)> = report.results[0]
        .violations
        .iter()
        .map(|v| (v.line, v.rule.as_str()))
        .collect();

    assert_eq!(codes, vec![(3, "MD013"), (6, "MD009")]);
}

#[test]
fn test_lint_patterns_with_excludes() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "docs/a.md", "# A\n");
    write(temp.path(), "docs/vendor/b.md", "# B\n");

    let config = LinterConfig {
        exclude: vec!["**/vendor/**".to_string()],
        ..LinterConfig::default()
    };
    let linter = Linter::new(config).unwrap();
    let files = linter
        .discover(&["**/*.md".to_string()], temp.path())
        .unwrap();

    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("docs/a.md"));
}

#[test]
fn test_config_errors_fail_before_linting() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "bad.rb", "all\nrule 'MD999'\n");
    let config_path = write(temp.path(), ".mdstyle.json", r#"{ "style": "bad.rb" }"#);

    let config = LinterConfig::from_file(config_path).unwrap();
    match Linter::new(config) {
        Err(LinterError::UnknownRule { code, origin }) => {
            assert_eq!(code, "MD999");
            assert_eq!(
                origin,
                DirectiveOrigin::Script {
                    path: temp.path().join("bad.rb"),
                    line: 2,
                }
            );
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected an UnknownRule error"),
    }
}

#[test]
fn test_lint_text_matches_lint_file() {
    let temp = TempDir::new().unwrap();
    let linter = styled_linter(&temp);
    let source = "#Heading\nSee https://example.com\t\n";
    let path = write(temp.path(), "same.md", source);

    let from_file = linter.lint_file(&path).unwrap().violations;
    let from_text = linter.lint_text(source, Some(&path));
    assert_eq!(from_file, from_text);
    assert!(from_text.iter().all(|v| v.kind == ViolationKind::Style));
}
