//! Heading rules.

use mdstyle_ast::{Block, BlockKind, Document, HeadingStyle, Line};

use super::column;
use crate::{ParamSpec, Params, Rule, RuleError, RuleMeta, Violation};

/// Splits an ATX line into its indentation, hash count and the rest.
fn atx_parts(text: &str) -> Option<(usize, usize, &str)> {
    let trimmed = text.trim_start();
    let indent = text.chars().count() - trimmed.chars().count();
    let hashes = trimmed.chars().take_while(|&c| c == '#').count();
    if hashes == 0 {
        return None;
    }
    Some((indent, hashes, &trimmed[hashes..]))
}

/// Returns the line holding a heading's text.
fn text_line<'d>(doc: &'d Document, block: &Block) -> Option<&'d Line> {
    match block.heading() {
        Some((_, HeadingStyle::Setext)) => doc.line(block.end_line.saturating_sub(1).max(block.start_line)),
        Some(_) => doc.line(block.start_line),
        None => None,
    }
}

/// Returns a heading's text without markers.
fn heading_text(doc: &Document, block: &Block) -> String {
    let Some(line) = text_line(doc, block) else {
        return String::new();
    };
    match block.heading() {
        Some((_, HeadingStyle::Setext)) => line.text.trim().to_string(),
        Some((_, style)) => {
            let rest = atx_parts(&line.text).map(|(_, _, rest)| rest).unwrap_or("");
            let rest = if style == HeadingStyle::AtxClosed {
                rest.trim_end().trim_end_matches('#')
            } else {
                rest
            };
            rest.trim().to_string()
        }
        None => String::new(),
    }
}

/// MD001: heading levels should only increment by one level at a time.
pub struct HeaderIncrement;

impl Rule for HeaderIncrement {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new(
            "MD001",
            "header-increment",
            "Header levels should only increment by one level at a time",
        )
        .with_tags(&["headers"])
    }

    fn check(&self, doc: &Document, _params: &Params) -> Result<Vec<Violation>, RuleError> {
        let mut violations = Vec::new();
        let mut previous: Option<u8> = None;

        for block in doc.headings() {
            let Some((level, _)) = block.heading() else {
                continue;
            };
            if let Some(prev) = previous
                && level > prev + 1
            {
                violations.push(Violation::new(
                    "MD001",
                    block.start_line,
                    format!(
                        "Header levels should only increment by one level at a time (expected h{}; found h{})",
                        prev + 1,
                        level
                    ),
                ));
            }
            previous = Some(level);
        }

        Ok(violations)
    }
}

/// MD003: heading style.
pub struct HeaderStyle;

impl Rule for HeaderStyle {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new("MD003", "header-style", "Header style")
            .with_tags(&["headers"])
            .with_params(vec![
                ParamSpec::string("style", "consistent", "Required heading style")
                    .with_choices(&["consistent", "atx", "atx_closed", "setext"]),
            ])
    }

    fn check(&self, doc: &Document, params: &Params) -> Result<Vec<Violation>, RuleError> {
        let style = params.string("style")?;
        let expected = match style {
            "consistent" => match doc.headings().find_map(|b| b.heading()) {
                Some((_, first)) => first.as_str(),
                None => return Ok(Vec::new()),
            },
            "atx" | "atx_closed" | "setext" => style,
            other => {
                return Err(RuleError::InvalidValue {
                    name: "style".to_string(),
                    message: format!("unknown heading style '{}'", other),
                });
            }
        };

        let violations = doc
            .headings()
            .filter_map(|block| {
                let (level, found) = block.heading()?;
                // Setext only exists for levels 1 and 2.
                if expected == "setext" && level > 2 && found != HeadingStyle::Setext {
                    return None;
                }
                (found.as_str() != expected).then(|| {
                    Violation::new(
                        "MD003",
                        block.start_line,
                        format!(
                            "Header style (expected {}; found {})",
                            expected,
                            found.as_str()
                        ),
                    )
                })
            })
            .collect();

        Ok(violations)
    }
}

/// MD018: `#Heading` without a space after the hashes.
///
/// Such lines are not headings to a markdown parser, so they are looked
/// for in paragraphs.
pub struct NoMissingSpaceAtx;

impl Rule for NoMissingSpaceAtx {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new(
            "MD018",
            "no-missing-space-atx",
            "No space after hash on atx style header",
        )
        .with_tags(&["headers", "atx", "spaces"])
    }

    fn check(&self, doc: &Document, _params: &Params) -> Result<Vec<Violation>, RuleError> {
        let mut violations = Vec::new();

        for block in doc.blocks() {
            if block.kind != BlockKind::Paragraph {
                continue;
            }
            for line in doc.block_lines(block) {
                if line.indent >= 4 {
                    continue;
                }
                let Some((_, hashes, rest)) = atx_parts(&line.text) else {
                    continue;
                };
                let missing_space = hashes <= 6
                    && rest
                        .chars()
                        .next()
                        .is_some_and(|c| !c.is_whitespace() && c != '#');
                if missing_space {
                    violations.push(Violation::new(
                        "MD018",
                        line.number,
                        "No space after hash on atx style header",
                    ));
                }
            }
        }

        Ok(violations)
    }
}

/// MD019: more than one space after the hashes of an ATX heading.
pub struct NoMultipleSpaceAtx;

impl Rule for NoMultipleSpaceAtx {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new(
            "MD019",
            "no-multiple-space-atx",
            "Multiple spaces after hash on atx style header",
        )
        .with_tags(&["headers", "atx", "spaces"])
    }

    fn check(&self, doc: &Document, _params: &Params) -> Result<Vec<Violation>, RuleError> {
        let mut violations = Vec::new();

        for block in doc.headings() {
            if matches!(block.heading(), Some((_, HeadingStyle::Setext)) | None) {
                continue;
            }
            let Some(line) = doc.line(block.start_line) else {
                continue;
            };
            let Some((indent, hashes, rest)) = atx_parts(&line.text) else {
                continue;
            };
            let spaces = rest.chars().take_while(|c| c.is_whitespace()).count();
            if spaces > 1 && spaces < rest.chars().count() {
                violations.push(
                    Violation::new(
                        "MD019",
                        line.number,
                        "Multiple spaces after hash on atx style header",
                    )
                    .with_column(column(indent + hashes)),
                );
            }
        }

        Ok(violations)
    }
}

/// MD022: headings should be surrounded by blank lines.
pub struct BlanksAroundHeaders;

impl Rule for BlanksAroundHeaders {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new(
            "MD022",
            "blanks-around-headers",
            "Headers should be surrounded by blank lines",
        )
        .with_tags(&["headers", "blank_lines"])
    }

    fn check(&self, doc: &Document, _params: &Params) -> Result<Vec<Violation>, RuleError> {
        let mut violations = Vec::new();

        for (index, block) in doc.blocks().iter().enumerate() {
            if !block.is_heading() {
                continue;
            }
            if doc
                .previous_block(index)
                .is_some_and(|prev| !prev.is_blank() && prev.kind != BlockKind::FrontMatter)
            {
                violations.push(Violation::new(
                    "MD022",
                    block.start_line,
                    "Headers should be surrounded by blank lines (missing blank line above)",
                ));
            }
            if doc.next_block(index).is_some_and(|next| !next.is_blank()) {
                violations.push(Violation::new(
                    "MD022",
                    block.end_line,
                    "Headers should be surrounded by blank lines (missing blank line below)",
                ));
            }
        }

        Ok(violations)
    }
}

/// MD023: headings must start at the beginning of the line.
pub struct HeaderStartLeft;

impl Rule for HeaderStartLeft {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new(
            "MD023",
            "header-start-left",
            "Headers must start at the beginning of the line",
        )
        .with_tags(&["headers", "spaces"])
    }

    fn check(&self, doc: &Document, _params: &Params) -> Result<Vec<Violation>, RuleError> {
        let violations = doc
            .headings()
            .filter_map(|block| doc.line(block.start_line))
            .filter(|line| line.indent > 0)
            .map(|line| {
                Violation::new(
                    "MD023",
                    line.number,
                    "Headers must start at the beginning of the line",
                )
                .with_column(1)
            })
            .collect();

        Ok(violations)
    }
}

/// MD025: only one top level heading per document.
pub struct SingleH1;

impl Rule for SingleH1 {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new(
            "MD025",
            "single-h1",
            "Multiple top level headers in the same document",
        )
        .with_tags(&["headers"])
        .with_params(vec![ParamSpec::integer(
            "level",
            1,
            "Heading level treated as top level",
        )])
    }

    fn check(&self, doc: &Document, params: &Params) -> Result<Vec<Violation>, RuleError> {
        let top = params.integer("level")?;

        let violations = doc
            .headings()
            .filter(|block| block.heading().is_some_and(|(level, _)| i64::from(level) == top))
            .skip(1)
            .map(|block| {
                Violation::new(
                    "MD025",
                    block.start_line,
                    "Multiple top level headers in the same document",
                )
            })
            .collect();

        Ok(violations)
    }
}

/// MD026: trailing punctuation in headings.
pub struct NoTrailingPunctuation;

impl Rule for NoTrailingPunctuation {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new(
            "MD026",
            "no-trailing-punctuation",
            "Trailing punctuation in header",
        )
        .with_tags(&["headers"])
        .with_params(vec![ParamSpec::string(
            "punctuation",
            ".,;:!?",
            "Characters not allowed at the end of a heading",
        )])
    }

    fn check(&self, doc: &Document, params: &Params) -> Result<Vec<Violation>, RuleError> {
        let punctuation = params.string("punctuation")?;

        let violations = doc
            .headings()
            .filter_map(|block| {
                let last = heading_text(doc, block).chars().last()?;
                let line = text_line(doc, block)?;
                punctuation.contains(last).then(|| {
                    Violation::new(
                        "MD026",
                        line.number,
                        format!("Trailing punctuation in header ('{}')", last),
                    )
                })
            })
            .collect();

        Ok(violations)
    }
}
