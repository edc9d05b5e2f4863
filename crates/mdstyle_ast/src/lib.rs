//! # mdstyle_ast
//!
//! Document model types for the mdstyle markdown linter.
//!
//! A [`Document`] is produced by a parser from raw text and then only read:
//! rules query its [`Line`]s, the [`Block`]s partitioning them, and the
//! [`InlineSpan`]s found inside blocks.

mod document;
mod span;

pub use document::{
    Block, BlockKind, CodeBlockStyle, Document, HeadingStyle, InlineKind, InlineSpan, Line,
};
pub use span::{Position, Span};
