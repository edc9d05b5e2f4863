//! Whitespace rules: trailing spaces, hard tabs, blank lines, final newline.

use mdstyle_ast::{BlockKind, Document};

use super::column;
use crate::{ParamSpec, Params, Rule, RuleError, RuleMeta, Violation};

/// MD009: trailing whitespace.
///
/// A non-blank line may end in exactly `br_spaces` spaces (a hard line
/// break) when `br_spaces` is 2 or more. Any other trailing whitespace,
/// including whitespace-only lines, is reported.
pub struct NoTrailingSpaces;

impl Rule for NoTrailingSpaces {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new("MD009", "no-trailing-spaces", "Trailing spaces")
            .with_tags(&["whitespace"])
            .with_params(vec![ParamSpec::integer(
                "br_spaces",
                0,
                "Number of trailing spaces allowed as a line break (values below 2 allow none)",
            )])
    }

    fn check(&self, doc: &Document, params: &Params) -> Result<Vec<Violation>, RuleError> {
        let br_spaces = params.count("br_spaces")?;

        let violations = doc
            .lines()
            .iter()
            .filter_map(|line| {
                let trailing = line.trailing_whitespace();
                if trailing.is_empty() {
                    return None;
                }
                let count = trailing.chars().count();
                let line_break = br_spaces >= 2
                    && !line.is_blank
                    && count == br_spaces
                    && trailing.chars().all(|c| c == ' ');
                if line_break {
                    return None;
                }
                let expected = if br_spaces >= 2 {
                    format!("0 or {}", br_spaces)
                } else {
                    "0".to_string()
                };
                Some(
                    Violation::new(
                        "MD009",
                        line.number,
                        format!("Trailing spaces (expected {}; found {})", expected, count),
                    )
                    .with_column(column(line.char_len() - count)),
                )
            })
            .collect();

        Ok(violations)
    }
}

/// MD010: hard tab characters.
pub struct NoHardTabs;

impl Rule for NoHardTabs {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new("MD010", "no-hard-tabs", "Hard tabs")
            .with_tags(&["whitespace", "hard_tab"])
            .with_params(vec![ParamSpec::boolean(
                "ignore_code_blocks",
                false,
                "Do not report tabs inside code blocks",
            )])
    }

    fn check(&self, doc: &Document, params: &Params) -> Result<Vec<Violation>, RuleError> {
        let ignore_code_blocks = params.boolean("ignore_code_blocks")?;

        let mut violations = Vec::new();
        for line in doc.lines() {
            if ignore_code_blocks && doc.block_of(line.number).is_some_and(|b| b.is_code()) {
                continue;
            }
            if let Some(idx) = line.text.chars().position(|c| c == '\t') {
                violations.push(
                    Violation::new("MD010", line.number, "Hard tabs").with_column(column(idx)),
                );
            }
        }
        Ok(violations)
    }
}

/// MD012: consecutive blank lines.
///
/// Blank lines inside code blocks and front matter are not counted. Each run longer than
/// `maximum` is reported once, covering the excess lines.
pub struct NoMultipleBlanks;

impl Rule for NoMultipleBlanks {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new("MD012", "no-multiple-blanks", "Multiple consecutive blank lines")
            .with_tags(&["whitespace", "blank_lines"])
            .with_params(vec![ParamSpec::integer(
                "maximum",
                1,
                "Number of consecutive blank lines allowed",
            )])
    }

    fn check(&self, doc: &Document, params: &Params) -> Result<Vec<Violation>, RuleError> {
        let maximum = params.count("maximum")?;

        // Runs are taken from lines, not blocks; blank lines inside list
        // items belong to the item's block.
        let mut runs: Vec<(u32, u32)> = Vec::new();
        for line in doc.lines() {
            let exempt = doc
                .blocks()
                .get(line.block)
                .is_some_and(|b| b.is_code() || b.kind == BlockKind::FrontMatter);
            if !line.is_blank || exempt {
                continue;
            }
            match runs.last_mut() {
                Some((_, end)) if *end + 1 == line.number => *end = line.number,
                _ => runs.push((line.number, line.number)),
            }
        }

        let violations = runs
            .into_iter()
            .filter(|(start, end)| (end - start + 1) as usize > maximum)
            .map(|(start, end)| {
                let found = end - start + 1;
                Violation::new(
                    "MD012",
                    start + maximum as u32,
                    format!(
                        "Multiple consecutive blank lines (expected at most {}; found {})",
                        maximum, found
                    ),
                )
                .with_end_line(end)
            })
            .collect();

        Ok(violations)
    }
}

/// MD047: the document must end with a newline.
pub struct SingleTrailingNewline;

impl Rule for SingleTrailingNewline {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new(
            "MD047",
            "single-trailing-newline",
            "File should end with a single newline character",
        )
        .with_tags(&["blank_lines"])
    }

    fn check(&self, doc: &Document, _params: &Params) -> Result<Vec<Violation>, RuleError> {
        if doc.ends_with_newline() {
            return Ok(Vec::new());
        }
        let Some(last) = doc.lines().last() else {
            return Ok(Vec::new());
        };
        Ok(vec![
            Violation::new(
                "MD047",
                last.number,
                "File should end with a single newline character",
            )
            .with_column(column(last.char_len())),
        ])
    }
}
