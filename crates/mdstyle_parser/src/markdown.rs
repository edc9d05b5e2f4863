//! Markdown parser using markdown-rs (wooorm/markdown-rs).
//!
//! Block structure is taken from the mdast produced by the `markdown`
//! crate and projected onto source lines.

use markdown::mdast::Node;
use markdown::{ParseOptions, to_mdast};
use mdstyle_ast::{
    BlockKind, CodeBlockStyle, Document, HeadingStyle, InlineKind, InlineSpan, Position, Span,
};

use crate::Parser;
use crate::lines::{RawLine, Slot, assemble, split_lines};

/// Markdown parser implementation.
///
/// Parses CommonMark with GFM extensions and front matter.
pub struct MarkdownParser;

impl MarkdownParser {
    /// Creates a new Markdown parser with default options.
    pub fn new() -> Self {
        Self
    }

    /// Gets default parse options (GFM + front matter).
    fn default_options() -> ParseOptions {
        let mut options = ParseOptions::gfm();
        options.constructs.frontmatter = true;
        options
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for MarkdownParser {
    fn name(&self) -> &str {
        "markdown"
    }

    fn extensions(&self) -> &[&str] {
        &["md", "markdown", "mdown", "mkdn", "mkd"]
    }

    fn parse(&self, source: &str) -> Document {
        let raw = split_lines(source);
        let ends_with_newline = source.ends_with('\n');

        // Only MDX constructs can make mdast construction fail; fall back
        // to plain line classification so parsing stays total.
        let Ok(root) = to_mdast(source, &Self::default_options()) else {
            return assemble(&raw, Vec::new(), 0, Vec::new(), ends_with_newline);
        };

        let mut classifier = Classifier::new(source, &raw);
        classifier.visit_block(&root);

        let Classifier {
            slots,
            next_id,
            inlines,
            ..
        } = classifier;
        assemble(&raw, slots, next_id, inlines, ends_with_newline)
    }
}

/// Walks the mdast and claims lines for block nodes.
struct Classifier<'s, 'r> {
    source: &'s str,
    raw: &'r [RawLine<'s>],
    slots: Vec<Slot>,
    next_id: usize,
    inlines: Vec<InlineSpan>,
}

impl<'s, 'r> Classifier<'s, 'r> {
    fn new(source: &'s str, raw: &'r [RawLine<'s>]) -> Self {
        Self {
            source,
            raw,
            slots: vec![None; raw.len()],
            next_id: 0,
            inlines: Vec::new(),
        }
    }

    fn visit_block(&mut self, node: &Node) {
        match node {
            Node::Root(root) => {
                for child in &root.children {
                    self.visit_block(child);
                }
            }
            Node::Paragraph(para) => {
                self.claim(node, BlockKind::Paragraph);
                self.collect_inlines(&para.children, true);
            }
            Node::Heading(heading) => {
                if let Some((start, end)) = self.line_range(node) {
                    let style = self.heading_style(start, end);
                    self.mark(
                        start,
                        end,
                        BlockKind::Heading {
                            level: heading.depth,
                            style,
                        },
                    );
                }
                self.collect_inlines(&heading.children, true);
            }
            Node::Code(code) => {
                if let Some((start, end)) = self.line_range(node) {
                    let kind = self.code_kind(code.lang.clone(), start, end);
                    self.mark(start, end, kind);
                }
            }
            Node::List(list) => {
                for item in &list.children {
                    self.claim(
                        item,
                        BlockKind::ListItem {
                            ordered: list.ordered,
                        },
                    );
                    if let Some(children) = item.children() {
                        self.claim_nested_code(children);
                        self.collect_inlines(children, false);
                    }
                }
            }
            Node::Blockquote(quote) => {
                self.claim(node, BlockKind::BlockQuote);
                self.collect_inlines(&quote.children, false);
            }
            Node::Table(table) => {
                self.claim(node, BlockKind::Table);
                self.collect_inlines(&table.children, false);
            }
            Node::Html(_) => self.claim(node, BlockKind::Html),
            Node::ThematicBreak(_) => self.claim(node, BlockKind::ThematicBreak),
            Node::Yaml(_) | Node::Toml(_) => self.claim(node, BlockKind::FrontMatter),
            Node::Definition(_) => self.claim(node, BlockKind::Definition),
            Node::FootnoteDefinition(def) => {
                self.claim(node, BlockKind::Definition);
                self.collect_inlines(&def.children, false);
            }
            _ => self.claim(node, BlockKind::Paragraph),
        }
    }

    /// Fenced code nested in list items is still code.
    fn claim_nested_code(&mut self, children: &[Node]) {
        for child in children {
            match child {
                Node::Code(code) => {
                    if let Some((start, end)) = self.line_range(child) {
                        let kind = self.code_kind(code.lang.clone(), start, end);
                        self.mark(start, end, kind);
                    }
                }
                _ => {
                    if let Some(grandchildren) = child.children() {
                        self.claim_nested_code(grandchildren);
                    }
                }
            }
        }
    }

    fn collect_inlines(&mut self, children: &[Node], inline: bool) {
        for child in children {
            let kind = match child {
                Node::InlineCode(_) => Some(InlineKind::Code),
                Node::Link(_) => Some(self.link_kind(child)),
                Node::LinkReference(_) => Some(InlineKind::Link),
                Node::Image(_) | Node::ImageReference(_) => Some(InlineKind::Image),
                Node::Html(_) if inline => Some(InlineKind::Html),
                _ => None,
            };

            if let Some(kind) = kind
                && let Some(pos) = child.position()
            {
                self.inlines.push(InlineSpan {
                    kind,
                    start: Position::new(pos.start.line as u32, pos.start.column as u32),
                    span: Span::new(pos.start.offset as u32, pos.end.offset as u32),
                });
            }

            if let Some(grandchildren) = child.children() {
                let inline = inline
                    || matches!(
                        child,
                        Node::Paragraph(_) | Node::Heading(_) | Node::TableCell(_)
                    );
                self.collect_inlines(grandchildren, inline);
            }
        }
    }

    /// Distinguishes `[text](url)` / `<url>` from a GFM autolink literal.
    fn link_kind(&self, node: &Node) -> InlineKind {
        let written = node.position().and_then(|pos| {
            self.source
                .get(pos.start.offset..pos.end.offset)
                .and_then(|text| text.chars().next())
        });
        match written {
            Some('[') | Some('<') => InlineKind::Link,
            _ => InlineKind::BareUrl,
        }
    }

    fn claim(&mut self, node: &Node, kind: BlockKind) {
        if let Some((start, end)) = self.line_range(node) {
            self.mark(start, end, kind);
        }
    }

    fn mark(&mut self, start: u32, end: u32, kind: BlockKind) {
        self.next_id += 1;
        let id = self.next_id;
        for number in start..=end {
            if let Some(slot) = self.slots.get_mut(number as usize - 1) {
                *slot = Some((id, kind.clone()));
            }
        }
    }

    /// Returns the inclusive 1-indexed line range covered by a node.
    fn line_range(&self, node: &Node) -> Option<(u32, u32)> {
        let pos = node.position()?;
        let start = pos.start.line as u32;
        let mut end = pos.end.line as u32;
        // A node ending at column 1 stops before that line.
        if pos.end.column == 1 && end > start {
            end -= 1;
        }
        let end = end.min(self.raw.len() as u32);
        if start == 0 || start > end {
            return None;
        }
        Some((start, end))
    }

    fn line_text(&self, number: u32) -> &'s str {
        self.raw
            .get(number as usize - 1)
            .map(|l| l.text)
            .unwrap_or("")
    }

    fn heading_style(&self, start: u32, end: u32) -> HeadingStyle {
        if end > start {
            return HeadingStyle::Setext;
        }
        let text = self.line_text(start).trim();
        let body = text.trim_start_matches('#');
        if !body.is_empty() && body.ends_with('#') {
            let before_closing = body.trim_end_matches('#');
            if before_closing.ends_with(char::is_whitespace) {
                return HeadingStyle::AtxClosed;
            }
        }
        if text.starts_with('#') {
            HeadingStyle::Atx
        } else {
            HeadingStyle::Setext
        }
    }

    fn code_kind(&self, lang: Option<String>, start: u32, end: u32) -> BlockKind {
        let opening = self.line_text(start).trim_start();
        let fence_char = match opening.chars().next() {
            Some(c @ ('`' | '~')) if opening.starts_with(&c.to_string().repeat(3)) => c,
            _ => {
                return BlockKind::CodeBlock {
                    style: CodeBlockStyle::Indented,
                    lang,
                    closed: true,
                };
            }
        };
        let fence_len = opening.chars().take_while(|&c| c == fence_char).count();

        let closing = self.line_text(end).trim();
        let closed = end > start
            && closing.chars().all(|c| c == fence_char)
            && closing.chars().count() >= fence_len;

        BlockKind::CodeBlock {
            style: CodeBlockStyle::Fenced,
            lang,
            closed,
        }
    }
}
