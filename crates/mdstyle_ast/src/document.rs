//! Parsed document representation.
//!
//! A [`Document`] is an ordered list of [`Line`]s partitioned into
//! [`Block`]s. Every line belongs to exactly one block, blocks never
//! overlap and there are no gaps between them.

use crate::{Position, Span};

/// A single source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Line number (1-indexed).
    pub number: u32,
    /// Line text without the line terminator.
    pub text: String,
    /// Indentation in columns (tabs advance to the next multiple of 4).
    pub indent: u32,
    /// Whether this line contains only whitespace.
    pub is_blank: bool,
    /// Index of the block this line belongs to.
    pub block: usize,
}

impl Line {
    /// Creates a line, deriving indentation and blankness from its text.
    pub fn new(number: u32, text: impl Into<String>, block: usize) -> Self {
        let text = text.into();
        let is_blank = text.trim().is_empty();
        let indent = if is_blank {
            0
        } else {
            text.chars()
                .take_while(|c| c.is_whitespace())
                .fold(0u32, |acc, c| {
                    if c == '\t' {
                        (acc + 4) / 4 * 4
                    } else {
                        acc + 1
                    }
                })
        };

        Self {
            number,
            text,
            indent,
            is_blank,
            block,
        }
    }

    /// Returns the length of the line in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Returns the trailing whitespace of the line.
    pub fn trailing_whitespace(&self) -> &str {
        let trimmed = self.text.trim_end();
        &self.text[trimmed.len()..]
    }
}

/// Style of a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingStyle {
    /// `# Heading`
    Atx,
    /// `# Heading #`
    AtxClosed,
    /// Underlined with `===` or `---`.
    Setext,
}

impl HeadingStyle {
    /// Returns the style name used in rule parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingStyle::Atx => "atx",
            HeadingStyle::AtxClosed => "atx_closed",
            HeadingStyle::Setext => "setext",
        }
    }
}

/// Style of a code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeBlockStyle {
    /// Delimited by ```` ``` ```` or `~~~` fences.
    Fenced,
    /// Indented by four spaces.
    Indented,
}

impl CodeBlockStyle {
    /// Returns the style name used in rule parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeBlockStyle::Fenced => "fenced",
            CodeBlockStyle::Indented => "indented",
        }
    }
}

/// Structural type of a block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// One or more blank lines between other blocks.
    Blank,
    Paragraph,
    Heading {
        /// Heading level (1-6).
        level: u8,
        style: HeadingStyle,
    },
    CodeBlock {
        style: CodeBlockStyle,
        /// Info string language, if any.
        lang: Option<String>,
        /// False when a fence was never closed and the block runs to the
        /// end of the document.
        closed: bool,
    },
    ListItem {
        ordered: bool,
    },
    BlockQuote,
    Table,
    Html,
    ThematicBreak,
    FrontMatter,
    Definition,
}

impl BlockKind {
    /// Returns a short name for the block type.
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Blank => "blank",
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading { .. } => "heading",
            BlockKind::CodeBlock { .. } => "code_block",
            BlockKind::ListItem { .. } => "list_item",
            BlockKind::BlockQuote => "block_quote",
            BlockKind::Table => "table",
            BlockKind::Html => "html",
            BlockKind::ThematicBreak => "thematic_break",
            BlockKind::FrontMatter => "front_matter",
            BlockKind::Definition => "definition",
        }
    }
}

/// A contiguous run of lines sharing a structural type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    /// First line of the block (1-indexed, inclusive).
    pub start_line: u32,
    /// Last line of the block (1-indexed, inclusive).
    pub end_line: u32,
}

impl Block {
    /// Creates a new block.
    pub fn new(kind: BlockKind, start_line: u32, end_line: u32) -> Self {
        Self {
            kind,
            start_line,
            end_line,
        }
    }

    /// Returns the number of lines in the block.
    pub fn line_count(&self) -> u32 {
        self.end_line - self.start_line + 1
    }

    /// Returns true if the given line number falls inside the block.
    pub fn contains_line(&self, line: u32) -> bool {
        self.start_line <= line && line <= self.end_line
    }

    pub fn is_blank(&self) -> bool {
        matches!(self.kind, BlockKind::Blank)
    }

    pub fn is_code(&self) -> bool {
        matches!(self.kind, BlockKind::CodeBlock { .. })
    }

    pub fn is_table(&self) -> bool {
        matches!(self.kind, BlockKind::Table)
    }

    pub fn is_heading(&self) -> bool {
        matches!(self.kind, BlockKind::Heading { .. })
    }

    /// Returns the heading level and style for heading blocks.
    pub fn heading(&self) -> Option<(u8, HeadingStyle)> {
        match self.kind {
            BlockKind::Heading { level, style } => Some((level, style)),
            _ => None,
        }
    }
}

/// Kind of an inline span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineKind {
    /// `` `code` ``
    Code,
    /// `[text](url)`, `[text][ref]` or `<url>`
    Link,
    Image,
    /// Inline HTML.
    Html,
    /// A URL written as plain text.
    BareUrl,
}

/// An inline element located inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    pub kind: InlineKind,
    /// Start of the element.
    pub start: Position,
    /// Byte range of the element in the source.
    pub span: Span,
}

/// A parsed document.
///
/// Immutable once built; construct it with a parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
    blocks: Vec<Block>,
    inlines: Vec<InlineSpan>,
    ends_with_newline: bool,
}

impl Document {
    /// Assembles a document from already classified parts.
    ///
    /// `blocks` must partition `lines` in order, and each line's `block`
    /// index must point at the block containing it.
    pub fn from_parts(
        lines: Vec<Line>,
        blocks: Vec<Block>,
        inlines: Vec<InlineSpan>,
        ends_with_newline: bool,
    ) -> Self {
        debug_assert!(
            lines
                .iter()
                .all(|line| blocks
                    .get(line.block)
                    .is_some_and(|b| b.contains_line(line.number))),
            "every line must belong to its block"
        );

        Self {
            lines,
            blocks,
            inlines,
            ends_with_newline,
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the line with the given number (1-indexed).
    pub fn line(&self, number: u32) -> Option<&Line> {
        if number == 0 {
            return None;
        }
        self.lines.get(number as usize - 1)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Returns the block containing the given line.
    pub fn block_of(&self, line: u32) -> Option<&Block> {
        self.line(line).and_then(|l| self.blocks.get(l.block))
    }

    /// Returns the lines of a block.
    pub fn block_lines(&self, block: &Block) -> &[Line] {
        let start = (block.start_line as usize).saturating_sub(1);
        let end = (block.end_line as usize).min(self.lines.len());
        &self.lines[start.min(end)..end]
    }

    /// Returns the block before the given block index, if any.
    pub fn previous_block(&self, index: usize) -> Option<&Block> {
        index.checked_sub(1).and_then(|i| self.blocks.get(i))
    }

    /// Returns the block after the given block index, if any.
    pub fn next_block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index + 1)
    }

    /// Iterates over heading blocks.
    pub fn headings(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.is_heading())
    }

    /// Iterates over code blocks.
    pub fn code_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.is_code())
    }

    pub fn inlines(&self) -> &[InlineSpan] {
        &self.inlines
    }

    /// Returns true if the raw text ended with a line terminator.
    pub fn ends_with_newline(&self) -> bool {
        self.ends_with_newline
    }
}
