//! Code block rules.

use mdstyle_ast::{Block, BlockKind, CodeBlockStyle, Document};

use crate::{ParamSpec, Params, Rule, RuleError, RuleMeta, Violation};

fn code_style(block: &Block) -> Option<CodeBlockStyle> {
    match block.kind {
        BlockKind::CodeBlock { style, .. } => Some(style),
        _ => None,
    }
}

fn is_fenced(block: &Block) -> bool {
    code_style(block) == Some(CodeBlockStyle::Fenced)
}

/// MD031: fenced code blocks should be surrounded by blank lines.
pub struct BlanksAroundFences;

impl Rule for BlanksAroundFences {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new(
            "MD031",
            "blanks-around-fences",
            "Fenced code blocks should be surrounded by blank lines",
        )
        .with_tags(&["code", "blank_lines"])
    }

    fn check(&self, doc: &Document, _params: &Params) -> Result<Vec<Violation>, RuleError> {
        let mut violations = Vec::new();

        for (index, block) in doc.blocks().iter().enumerate() {
            if !is_fenced(block) {
                continue;
            }
            if doc.previous_block(index).is_some_and(|prev| !prev.is_blank()) {
                violations.push(Violation::new(
                    "MD031",
                    block.start_line,
                    "Fenced code blocks should be surrounded by blank lines",
                ));
            }
            if doc.next_block(index).is_some_and(|next| !next.is_blank()) {
                violations.push(Violation::new(
                    "MD031",
                    block.end_line,
                    "Fenced code blocks should be surrounded by blank lines",
                ));
            }
        }

        Ok(violations)
    }
}

/// MD040: fenced code blocks should declare a language.
pub struct FencedCodeLanguage;

impl Rule for FencedCodeLanguage {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new(
            "MD040",
            "fenced-code-language",
            "Fenced code blocks should have a language specified",
        )
        .with_tags(&["code", "language"])
    }

    fn check(&self, doc: &Document, _params: &Params) -> Result<Vec<Violation>, RuleError> {
        let violations = doc
            .code_blocks()
            .filter(|block| {
                matches!(
                    &block.kind,
                    BlockKind::CodeBlock {
                        style: CodeBlockStyle::Fenced,
                        lang: None,
                        ..
                    }
                )
            })
            .map(|block| {
                Violation::new(
                    "MD040",
                    block.start_line,
                    "Fenced code blocks should have a language specified",
                )
            })
            .collect();

        Ok(violations)
    }
}

/// MD046: code block style.
pub struct CodeBlockStyleRule;

impl Rule for CodeBlockStyleRule {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new("MD046", "code-block-style", "Code block style")
            .with_tags(&["code"])
            .with_params(vec![
                ParamSpec::string("style", "fenced", "Required code block style")
                    .with_choices(&["consistent", "fenced", "indented"]),
            ])
    }

    fn check(&self, doc: &Document, params: &Params) -> Result<Vec<Violation>, RuleError> {
        let expected = match params.string("style")? {
            "consistent" => match doc.code_blocks().find_map(code_style) {
                Some(first) => first,
                None => return Ok(Vec::new()),
            },
            "fenced" => CodeBlockStyle::Fenced,
            "indented" => CodeBlockStyle::Indented,
            other => {
                return Err(RuleError::InvalidValue {
                    name: "style".to_string(),
                    message: format!("unknown code block style '{}'", other),
                });
            }
        };

        let violations = doc
            .code_blocks()
            .filter_map(|block| {
                let found = code_style(block)?;
                (found != expected).then(|| {
                    Violation::new(
                        "MD046",
                        block.start_line,
                        format!(
                            "Code block style (expected {}; found {})",
                            expected.as_str(),
                            found.as_str()
                        ),
                    )
                })
            })
            .collect();

        Ok(violations)
    }
}
