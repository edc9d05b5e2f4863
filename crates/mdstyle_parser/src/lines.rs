//! Line splitting and block assembly shared by all parsers.

use mdstyle_ast::{Block, BlockKind, Document, InlineSpan, Line};

/// A line of source text before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawLine<'a> {
    /// Line number (1-indexed).
    pub number: u32,
    /// Text without the line terminator.
    pub text: &'a str,
}

impl RawLine<'_> {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Splits source text into lines.
///
/// Follows `str::lines` semantics: a trailing terminator does not start a
/// new line, and `\r\n` is stripped as a whole.
pub(crate) fn split_lines(source: &str) -> Vec<RawLine<'_>> {
    source
        .split_inclusive('\n')
        .enumerate()
        .map(|(idx, piece)| {
            let text = match piece.strip_suffix('\n') {
                Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
                None => piece,
            };
            RawLine {
                number: idx as u32 + 1,
                text,
            }
        })
        .collect()
}

/// Per-line classification: the id of the node that claimed the line and
/// the block kind it assigned.
pub(crate) type Slot = Option<(usize, BlockKind)>;

/// Builds a [`Document`] from classified lines.
///
/// Lines left unclassified become `Blank` (blank lines) or `Paragraph`
/// (anything else); runs of such lines are grouped into one block each.
/// Consecutive lines claimed by the same node form one block.
pub(crate) fn assemble(
    raw: &[RawLine<'_>],
    mut slots: Vec<Slot>,
    mut next_id: usize,
    inlines: Vec<InlineSpan>,
    ends_with_newline: bool,
) -> Document {
    slots.resize(raw.len(), None);

    let mut fill: Option<(usize, bool)> = None;
    for (line, slot) in raw.iter().zip(slots.iter_mut()) {
        if slot.is_some() {
            fill = None;
            continue;
        }
        let blank = line.is_blank();
        let id = match fill {
            Some((id, was_blank)) if was_blank == blank => id,
            _ => {
                next_id += 1;
                fill = Some((next_id, blank));
                next_id
            }
        };
        let kind = if blank {
            BlockKind::Blank
        } else {
            BlockKind::Paragraph
        };
        *slot = Some((id, kind));
    }

    let mut blocks: Vec<Block> = Vec::new();
    let mut lines = Vec::with_capacity(raw.len());
    let mut current: Option<usize> = None;

    for (line, slot) in raw.iter().zip(slots) {
        let Some((id, kind)) = slot else { continue };
        if current != Some(id) {
            blocks.push(Block::new(kind, line.number, line.number));
            current = Some(id);
        } else if let Some(block) = blocks.last_mut() {
            block.end_line = line.number;
        }
        lines.push(Line::new(line.number, line.text, blocks.len() - 1));
    }

    Document::from_parts(lines, blocks, inlines, ends_with_newline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(source: &str) -> Vec<&str> {
        split_lines(source).into_iter().map(|l| l.text).collect()
    }

    #[test]
    fn test_split_lines_empty() {
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_split_lines_matches_str_lines() {
        for source in ["a", "a\n", "a\n\n", "a\nb", "\n", "a\r\nb\r\n", "\n\n\n"] {
            let expected: Vec<&str> = source.lines().collect();
            assert_eq!(texts(source), expected, "source: {:?}", source);
        }
    }

    #[test]
    fn test_split_lines_numbers() {
        let lines = split_lines("x\ny\nz");
        let numbers: Vec<u32> = lines.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_assemble_unclassified() {
        let raw = split_lines("one\ntwo\n\n\nthree");
        let doc = assemble(&raw, Vec::new(), 0, Vec::new(), false);

        let kinds: Vec<(&str, u32, u32)> = doc
            .blocks()
            .iter()
            .map(|b| (b.kind.name(), b.start_line, b.end_line))
            .collect();
        assert_eq!(
            kinds,
            vec![("paragraph", 1, 2), ("blank", 3, 4), ("paragraph", 5, 5)]
        );
    }

    #[test]
    fn test_assemble_splits_distinct_nodes() {
        let raw = split_lines("- a\n- b");
        let kind = BlockKind::ListItem { ordered: false };
        let slots = vec![Some((1, kind.clone())), Some((2, kind))];
        let doc = assemble(&raw, slots, 2, Vec::new(), false);

        assert_eq!(doc.blocks().len(), 2);
        assert_eq!(doc.lines()[1].block, 1);
    }
}
