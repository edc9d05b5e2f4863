//! Parser trait definition.

use mdstyle_ast::Document;

/// Trait for parsing source text into a [`Document`].
///
/// Parsing is total: every input, including empty or malformed text,
/// produces a document. Malformed structure (for example an unterminated
/// code fence) is resolved permissively instead of failing.
pub trait Parser {
    /// Returns the name of this parser.
    fn name(&self) -> &str;

    /// Returns the file extensions this parser handles.
    ///
    /// Extensions should not include the leading dot (e.g., `["md", "markdown"]`).
    fn extensions(&self) -> &[&str];

    /// Parses the source text into a document.
    fn parse(&self, source: &str) -> Document;

    /// Returns true if this parser can handle the given file extension.
    fn can_parse(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
