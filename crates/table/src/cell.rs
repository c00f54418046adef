use crate::footnote::Footnote;
use bitflags::bitflags;
use tabula_style::{AreaStyle, HAlign, VAlign};
use tabula_types::{Axis, PerAxis};

bitflags! {
    /// Per-cell options. No alignment bits means right/top.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellOptions: u16 {
        const LEFT = 1 << 0;
        const CENTER = 1 << 1;
        const MIDDLE = 1 << 2;
        const BOTTOM = 1 << 3;
        /// The cell's slot refers to a joined cell.
        const JOIN = 1 << 4;
        const STYLE_MASK = 0b111 << 5;
    }
}

impl CellOptions {
    const STYLE_SHIFT: u32 = 5;

    pub fn halign(self) -> HAlign {
        if self.contains(Self::CENTER) {
            HAlign::Center
        } else if self.contains(Self::LEFT) {
            HAlign::Left
        } else {
            HAlign::Right
        }
    }

    pub fn valign(self) -> VAlign {
        if self.contains(Self::MIDDLE) {
            VAlign::Center
        } else if self.contains(Self::BOTTOM) {
            VAlign::Bottom
        } else {
            VAlign::Top
        }
    }

    /// Index into the table's style palette.
    pub fn style_index(self) -> usize {
        ((self & Self::STYLE_MASK).bits() >> Self::STYLE_SHIFT) as usize
    }

    /// Returns these options selecting palette entry `index` (taken modulo
    /// the palette size).
    pub fn with_style(self, index: usize) -> Self {
        let bits = ((index % crate::PALETTE_SIZE) as u16) << Self::STYLE_SHIFT;
        (self - Self::STYLE_MASK) | Self::from_bits_truncate(bits)
    }
}

/// A cell resolved through [`crate::TableProvider::get_cell`].
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell<'t> {
    /// Half-open `[start, end)` per axis; 1x1 for plain cells.
    pub span: PerAxis<[usize; 2]>,
    pub text: &'t str,
    pub options: CellOptions,
    pub style: &'t AreaStyle,
    pub footnotes: Vec<Footnote<'t>>,
}

impl<'t> TableCell<'t> {
    pub fn single(x: usize, y: usize, text: &'t str, options: CellOptions, style: &'t AreaStyle) -> Self {
        Self {
            span: PerAxis::new([x, x + 1], [y, y + 1]),
            text,
            options,
            style,
            footnotes: Vec::new(),
        }
    }

    /// True if `(x, y)` is the top-left corner of this cell's span.
    pub fn is_top_left(&self, x: usize, y: usize) -> bool {
        self.span[Axis::H][0] == x && self.span[Axis::V][0] == y
    }

    pub fn extent(&self, axis: Axis) -> usize {
        let [start, end] = self.span[axis];
        end - start
    }

    pub fn is_spanned(&self, axis: Axis) -> bool {
        self.extent(axis) > 1
    }

    /// Text followed by `[marker]` for each attached footnote.
    pub fn display_text(&self) -> String {
        let mut s = self.text.to_string();
        for footnote in &self.footnotes {
            s.push('[');
            s.push_str(footnote.marker);
            s.push(']');
        }
        s
    }
}
