//! Per-table storage for everything allocated after the grid itself.
//!
//! Allocations are only ever appended. Handles stay valid for the life of
//! the arena, and the whole arena is released at once when its table is
//! dropped. Overwritten text and orphaned joined cells are not reclaimed.

use crate::cell::CellOptions;
use crate::footnote::{FootnoteId, FootnoteRecord};
use tabula_style::AreaStyle;
use tabula_types::PerAxis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct TextRef {
    start: usize,
    end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct JoinId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StyleId(usize);

/// A rectangular run of cells sharing one text, footnote list and style.
#[derive(Debug, Clone)]
pub(crate) struct JoinedCell {
    /// Half-open `[start, end)` per axis.
    pub span: PerAxis<[usize; 2]>,
    pub text: TextRef,
    pub options: CellOptions,
    pub footnotes: Vec<FootnoteId>,
    pub style: Option<StyleId>,
}

#[derive(Debug, Default)]
pub struct TableArena {
    text: String,
    joined: Vec<JoinedCell>,
    footnotes: Vec<FootnoteRecord>,
    styles: Vec<AreaStyle>,
}

impl TableArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn alloc_str(&mut self, s: &str) -> TextRef {
        let start = self.text.len();
        self.text.push_str(s);
        TextRef {
            start,
            end: self.text.len(),
        }
    }

    pub(crate) fn str(&self, r: TextRef) -> &str {
        &self.text[r.start..r.end]
    }

    pub(crate) fn alloc_joined(&mut self, cell: JoinedCell) -> JoinId {
        self.joined.push(cell);
        JoinId(self.joined.len() - 1)
    }

    pub(crate) fn joined(&self, id: JoinId) -> &JoinedCell {
        &self.joined[id.0]
    }

    pub(crate) fn joined_mut(&mut self, id: JoinId) -> &mut JoinedCell {
        &mut self.joined[id.0]
    }

    pub(crate) fn alloc_footnote(&mut self, footnote: FootnoteRecord) -> FootnoteId {
        self.footnotes.push(footnote);
        FootnoteId(self.footnotes.len() - 1)
    }

    pub(crate) fn footnote(&self, id: FootnoteId) -> Option<&FootnoteRecord> {
        self.footnotes.get(id.0)
    }

    pub(crate) fn footnotes(&self) -> &[FootnoteRecord] {
        &self.footnotes
    }

    pub(crate) fn alloc_style(&mut self, style: AreaStyle) -> StyleId {
        self.styles.push(style);
        StyleId(self.styles.len() - 1)
    }

    pub(crate) fn style(&self, id: StyleId) -> &AreaStyle {
        &self.styles[id.0]
    }

    /// Number of joined cells allocated so far, including orphaned ones.
    pub fn joined_count(&self) -> usize {
        self.joined.len()
    }

    /// Approximate heap usage, for diagnostics.
    pub fn allocated_bytes(&self) -> usize {
        self.text.capacity()
            + self.joined.capacity() * std::mem::size_of::<JoinedCell>()
            + self
                .joined
                .iter()
                .map(|j| j.footnotes.capacity() * std::mem::size_of::<FootnoteId>())
                .sum::<usize>()
            + self.footnotes.capacity() * std::mem::size_of::<FootnoteRecord>()
            + self.styles.capacity() * std::mem::size_of::<AreaStyle>()
    }
}
