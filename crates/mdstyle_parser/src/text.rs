//! Plain text parser.

use mdstyle_ast::Document;

use crate::Parser;
use crate::lines::{assemble, split_lines};

/// Plain text parser.
///
/// Every run of non-blank lines is a paragraph, every run of blank lines
/// is a blank block. No code blocks or headings are recognized.
pub struct PlainTextParser;

impl PlainTextParser {
    /// Creates a new plain text parser.
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for PlainTextParser {
    fn name(&self) -> &str {
        "text"
    }

    fn extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn parse(&self, source: &str) -> Document {
        let raw = split_lines(source);
        assemble(&raw, Vec::new(), 0, Vec::new(), source.ends_with('\n'))
    }
}
