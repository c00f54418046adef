use crate::arena::{StyleId, TextRef};
use tabula_style::AreaStyle;

/// Handle to a footnote created by [`crate::Table::create_footnote`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FootnoteId(pub(crate) usize);

impl FootnoteId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub(crate) struct FootnoteRecord {
    pub content: TextRef,
    pub marker: TextRef,
    pub style: Option<StyleId>,
}

/// A footnote as seen through the resolution protocol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footnote<'t> {
    /// Position in creation order, starting at 0.
    pub index: usize,
    pub content: &'t str,
    pub marker: &'t str,
    pub style: Option<&'t AreaStyle>,
}
