//! Built-in rule catalog.
//!
//! Codes, names and defaults follow the markdownlint rule set.

mod code;
mod headings;
mod line_length;
mod links;
mod whitespace;

pub use code::{BlanksAroundFences, CodeBlockStyleRule, FencedCodeLanguage};
pub use headings::{
    BlanksAroundHeaders, HeaderIncrement, HeaderStartLeft, HeaderStyle, NoMissingSpaceAtx,
    NoMultipleSpaceAtx, NoTrailingPunctuation, SingleH1,
};
pub use line_length::LineLength;
pub use links::NoBareUrls;
pub use whitespace::{NoHardTabs, NoMultipleBlanks, NoTrailingSpaces, SingleTrailingNewline};

use crate::Rule;

/// Returns one instance of every built-in rule.
pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(HeaderIncrement),
        Box::new(HeaderStyle),
        Box::new(NoTrailingSpaces),
        Box::new(NoHardTabs),
        Box::new(NoMultipleBlanks),
        Box::new(LineLength),
        Box::new(NoMissingSpaceAtx),
        Box::new(NoMultipleSpaceAtx),
        Box::new(BlanksAroundHeaders),
        Box::new(HeaderStartLeft),
        Box::new(SingleH1),
        Box::new(NoTrailingPunctuation),
        Box::new(BlanksAroundFences),
        Box::new(NoBareUrls),
        Box::new(FencedCodeLanguage),
        Box::new(CodeBlockStyleRule),
        Box::new(SingleTrailingNewline),
    ]
}

/// Converts a character count to a 1-indexed column.
fn column(chars_before: usize) -> u32 {
    chars_before as u32 + 1
}
