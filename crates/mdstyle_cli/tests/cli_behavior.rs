//! Integration tests for CLI behavior
//!
//! These tests verify the external behavior of the mdstyle binary:
//! output lines, summary, and exit codes.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to create a command for the mdstyle CLI
fn mdstyle_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_mdstyle"))
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

mod help_command {
    use super::*;

    #[test]
    fn shows_help_with_flag() {
        mdstyle_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"));
    }

    #[test]
    fn shows_version_with_flag() {
        mdstyle_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

mod lint_command {
    use super::*;

    #[test]
    fn clean_file_exits_zero() {
        let temp = TempDir::new().unwrap();
        mdstyle_cmd()
            .current_dir(temp.path())
            .arg("lint")
            .arg(fixtures_dir().join("sample.md"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Checked 1 files, found 0 issues"));
    }

    #[test]
    fn violations_exit_one() {
        let temp = TempDir::new().unwrap();
        mdstyle_cmd()
            .current_dir(temp.path())
            .arg("lint")
            .arg(fixtures_dir().join("violations.md"))
            .assert()
            .code(1)
            .stdout(predicate::str::contains(
                "violations.md:1 MD022/blanks-around-headers",
            ))
            .stdout(predicate::str::contains(
                "violations.md:2:30 MD009/no-trailing-spaces Trailing spaces (expected 0; found 3)",
            ))
            .stdout(predicate::str::contains("Checked 1 files, found 2 issues"));
    }

    #[test]
    fn json_output() {
        let temp = TempDir::new().unwrap();
        let output = mdstyle_cmd()
            .current_dir(temp.path())
            .args(["lint", "--format", "json"])
            .arg(fixtures_dir().join("violations.md"))
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(1));
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let violations = json[0]["violations"].as_array().unwrap();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0]["rule"], "MD022");
        assert_eq!(violations[1]["rule"], "MD009");
        assert_eq!(violations[1]["column"], 30);
        assert_eq!(violations[1]["kind"], "style");
    }

    #[test]
    fn reports_zero_files_for_nonexistent_path() {
        let temp = TempDir::new().unwrap();
        mdstyle_cmd()
            .current_dir(temp.path())
            .arg("lint")
            .arg("nonexistent_file.md")
            .assert()
            .success()
            .stdout(predicate::str::contains("Checked 0 files"));
    }

    #[test]
    fn discovers_directory_documents() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("docs")).unwrap();
        std::fs::write(temp.path().join("docs/a.md"), "# A\n").unwrap();
        std::fs::write(temp.path().join("docs/b.md"), "# B\n").unwrap();

        mdstyle_cmd()
            .current_dir(temp.path())
            .args(["lint", "docs"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Checked 2 files, found 0 issues"));
    }
}

mod configuration {
    use super::*;

    fn long_line_doc(temp: &TempDir) {
        let body = format!("# Long\n\n{}\n", "word ".repeat(18).trim_end());
        std::fs::write(temp.path().join("long.md"), body).unwrap();
    }

    #[test]
    fn style_script_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        long_line_doc(&temp);

        mdstyle_cmd()
            .current_dir(temp.path())
            .args(["lint", "long.md"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("long.md:3:81 MD013/line-length"));

        mdstyle_cmd()
            .current_dir(temp.path())
            .arg("--style")
            .arg(fixtures_dir().join("sample.mdl.rb"))
            .args(["lint", "long.md"])
            .assert()
            .success();
    }

    #[test]
    fn discovers_config_in_working_directory() {
        let temp = TempDir::new().unwrap();
        long_line_doc(&temp);
        std::fs::write(
            temp.path().join(".mdstyle.jsonc"),
            "{\n  // long lines are fine here\n  \"rules\": { \"line-length\": false }\n}\n",
        )
        .unwrap();

        mdstyle_cmd()
            .current_dir(temp.path())
            .args(["lint", "long.md"])
            .assert()
            .success();
    }

    #[test]
    fn unknown_rule_is_a_config_error() {
        let temp = TempDir::new().unwrap();
        long_line_doc(&temp);
        std::fs::write(temp.path().join("bad.rb"), "all\nrule 'MD999'\n").unwrap();

        mdstyle_cmd()
            .current_dir(temp.path())
            .args(["-s", "bad.rb", "lint", "long.md"])
            .assert()
            .code(2)
            .stdout(predicate::str::contains("Checked").not())
            .stderr(predicate::str::contains("MD999"))
            .stderr(predicate::str::contains("bad.rb:2"));
    }

    #[test]
    fn invalid_parameter_is_a_config_error() {
        let temp = TempDir::new().unwrap();
        long_line_doc(&temp);
        std::fs::write(
            temp.path().join("bad.rb"),
            "rule 'MD013', :line_length => 'wide'\n",
        )
        .unwrap();

        mdstyle_cmd()
            .current_dir(temp.path())
            .args(["-s", "bad.rb", "lint", "long.md"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("line_length"));
    }

    #[test]
    fn explicit_config_file() {
        let temp = TempDir::new().unwrap();
        long_line_doc(&temp);
        std::fs::write(
            temp.path().join("custom.json"),
            r#"{ "rules": { "MD013": { "line_length": 120 } } }"#,
        )
        .unwrap();

        mdstyle_cmd()
            .current_dir(temp.path())
            .args(["-c", "custom.json", "lint", "long.md"])
            .assert()
            .success();
    }
}

mod other_commands {
    use super::*;

    #[test]
    fn rules_lists_catalog() {
        mdstyle_cmd()
            .arg("rules")
            .assert()
            .success()
            .stdout(predicate::str::contains("MD013 line-length"))
            .stdout(predicate::str::contains("MD047 single-trailing-newline"));
    }

    #[test]
    fn init_creates_config_once() {
        let temp = TempDir::new().unwrap();

        mdstyle_cmd()
            .current_dir(temp.path())
            .arg("init")
            .assert()
            .success();
        assert!(temp.path().join(".mdstyle.jsonc").is_file());

        mdstyle_cmd()
            .current_dir(temp.path())
            .arg("init")
            .assert()
            .code(2);

        mdstyle_cmd()
            .current_dir(temp.path())
            .args(["init", "--force"])
            .assert()
            .success();
    }
}
