//! MD034: bare URLs.

use mdstyle_ast::{Document, InlineKind};

use crate::{Params, Rule, RuleError, RuleMeta, Violation};

/// Reports URLs written without angle brackets or link syntax.
pub struct NoBareUrls;

impl Rule for NoBareUrls {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new("MD034", "no-bare-urls", "Bare URL used").with_tags(&["links", "url"])
    }

    fn check(&self, doc: &Document, _params: &Params) -> Result<Vec<Violation>, RuleError> {
        let violations = doc
            .inlines()
            .iter()
            .filter(|span| span.kind == InlineKind::BareUrl)
            .map(|span| {
                Violation::new("MD034", span.start.line, "Bare URL used")
                    .with_column(span.start.column)
            })
            .collect();

        Ok(violations)
    }
}
