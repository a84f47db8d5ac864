// Span Reporter
//
// Resolves each walked element to its category, drops categories the caller did
// not select, and converts byte spans into the requested unit. Declarations are
// reported first, then comments, each in pre-order.

use super::registry::KindRegistry;
use super::tree_methods::{comment_elements, declaration_elements, Element, SyntaxElement};
use super::types::{ByteSpan, DeclarationCategory, SpanRecord, SpanUnit};
use crate::selection::SelectionSet;
use tree_sitter::Tree;

/// Byte offset -> char offset / line number conversion for one text
///
/// Char offsets count UTF-16 code units, so a character outside the Basic
/// Multilingual Plane advances the offset by two.
#[derive(Debug)]
pub struct OffsetIndex {
    /// `(byte offset, UTF-16 offset)` of every char; `None` for pure ASCII text
    char_starts: Option<Vec<(usize, usize)>>,
    utf16_len: usize,
    line_starts: Vec<usize>,
}

impl OffsetIndex {
    pub fn new(content: &str) -> Self {
        let char_starts = if content.is_ascii() {
            None
        } else {
            Some(
                content
                    .char_indices()
                    .scan(0, |units, (byte, c)| {
                        let start = *units;
                        *units += c.len_utf16();
                        Some((byte, start))
                    })
                    .collect(),
            )
        };
        let utf16_len = match &char_starts {
            None => content.len(),
            Some(_) => content.chars().map(char::len_utf16).sum(),
        };

        let line_starts = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Self {
            char_starts,
            utf16_len,
            line_starts,
        }
    }

    /// Number of UTF-16 code units before `byte`
    pub fn char_offset(&self, byte: usize) -> usize {
        match &self.char_starts {
            None => byte,
            Some(starts) => {
                let idx = starts.partition_point(|&(start, _)| start < byte);
                starts.get(idx).map_or(self.utf16_len, |&(_, units)| units)
            }
        }
    }

    /// 1-based line containing `byte`
    pub fn line_of(&self, byte: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= byte)
    }

    pub fn convert(&self, span: ByteSpan, unit: SpanUnit) -> (usize, usize) {
        match unit {
            SpanUnit::Bytes => (span.start, span.end),
            SpanUnit::Chars => (self.char_offset(span.start), self.char_offset(span.end)),
            SpanUnit::Lines => {
                let last_byte = if span.is_empty() { span.start } else { span.end - 1 };
                (self.line_of(span.start), self.line_of(last_byte))
            }
        }
    }
}

/// Turns the elements of one tree into [`SpanRecord`]s
pub struct SpanExtractor<'a> {
    registry: &'a KindRegistry,
    selection: &'a SelectionSet,
    source: &'a str,
    offsets: OffsetIndex,
    unit: SpanUnit,
}

impl<'a> SpanExtractor<'a> {
    pub fn new(
        registry: &'a KindRegistry,
        selection: &'a SelectionSet,
        content: &'a str,
        unit: SpanUnit,
    ) -> Self {
        let offsets = match unit {
            // Byte spans are reported as-is.
            SpanUnit::Bytes => OffsetIndex {
                char_starts: None,
                utf16_len: content.len(),
                line_starts: Vec::new(),
            },
            _ => OffsetIndex::new(content),
        };

        Self {
            registry,
            selection,
            source: content,
            offsets,
            unit,
        }
    }

    /// Record for one element, or `None` if unregistered, rejected by the
    /// language's context rules, or not selected
    pub fn report(&self, element: &Element<'_>) -> Option<SpanRecord> {
        let category = if element.is_trivia() {
            self.registry
                .is_comment_kind(element.kind())
                .then_some(DeclarationCategory::Comment)?
        } else {
            let category = self.registry.category_for(element.kind())?;
            self.registry.refine(element.node(), self.source, category)?
        };

        if !self.selection.contains(category) {
            return None;
        }

        let (start, end) = self.offsets.convert(element.span(), self.unit);
        Some(SpanRecord {
            category,
            start,
            end,
        })
    }

    /// All records for a tree: the declaration pass followed by the comment pass
    pub fn extract<'t>(&'t self, tree: &'t Tree) -> impl Iterator<Item = SpanRecord> + 't {
        let this: &'t SpanExtractor<'t> = self;
        let root = tree.root_node();
        let declarations =
            declaration_elements(root, this.registry).filter_map(move |e| this.report(&e));
        let comments = comment_elements(root, this.registry).filter_map(move |e| this.report(&e));
        declarations.chain(comments)
    }
}
