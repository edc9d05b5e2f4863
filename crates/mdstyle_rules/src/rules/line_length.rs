//! MD013: line length.

use mdstyle_ast::Document;

use super::column;
use crate::{ParamSpec, Params, Rule, RuleError, RuleMeta, Violation};

/// Reports lines longer than `line_length` characters.
///
/// Lines inside code blocks, tables and headings can each be exempted.
pub struct LineLength;

impl Rule for LineLength {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new("MD013", "line-length", "Line length")
            .with_tags(&["line_length"])
            .with_params(vec![
                ParamSpec::integer("line_length", 80, "Maximum number of characters"),
                ParamSpec::boolean("code_blocks", true, "Check lines inside code blocks"),
                ParamSpec::boolean("tables", true, "Check lines inside tables"),
                ParamSpec::boolean("headers", true, "Check heading lines"),
            ])
    }

    fn check(&self, doc: &Document, params: &Params) -> Result<Vec<Violation>, RuleError> {
        let limit = params.count("line_length")?;
        let code_blocks = params.boolean("code_blocks")?;
        let tables = params.boolean("tables")?;
        let headers = params.boolean("headers")?;

        let mut violations = Vec::new();
        for line in doc.lines() {
            let length = line.char_len();
            if length <= limit {
                continue;
            }

            let exempt = doc.block_of(line.number).is_some_and(|block| {
                (!code_blocks && block.is_code())
                    || (!tables && block.is_table())
                    || (!headers && block.is_heading())
            });
            if exempt {
                continue;
            }

            violations.push(
                Violation::new(
                    "MD013",
                    line.number,
                    format!(
                        "Line length (expected at most {}; found {})",
                        limit, length
                    ),
                )
                .with_column(column(limit)),
            );
        }

        Ok(violations)
    }
}
