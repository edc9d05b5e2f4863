//! # mdstyle_parser
//!
//! Parsers producing the mdstyle document model.
//!
//! This crate provides:
//! - A `Parser` trait
//! - A Markdown parser built on `markdown-rs`
//! - A plain text parser
//!
//! ## Example
//!
//! ```rust
//! let doc = mdstyle_parser::parse("# Hello\n\nThis is a paragraph.\n");
//! assert_eq!(doc.line_count(), 3);
//! assert_eq!(doc.headings().count(), 1);
//! ```

mod lines;
mod markdown;
mod text;
mod traits;

use mdstyle_ast::Document;

pub use markdown::MarkdownParser;
pub use text::PlainTextParser;
pub use traits::Parser;

/// Parses markdown text into a [`Document`].
pub fn parse(source: &str) -> Document {
    MarkdownParser::new().parse(source)
}
