use crate::cell::{CellOptions, TableCell};
use crate::footnote::Footnote;
use crate::provider::TableProvider;
use crate::rule::BorderStyle;
use tabula_style::{AreaStyle, HAlign, VAlign};
use tabula_types::Axis;

/// A read-only table of plain text rows, derived from other content.
///
/// Used for item titles, captions and footnote listings, which are laid out
/// and serialized exactly like table bodies.
#[derive(Debug, Clone)]
pub struct TextTable {
    n_columns: usize,
    rows: Vec<Vec<String>>,
    options: CellOptions,
    style: AreaStyle,
}

impl TextTable {
    /// Builds a table from rows, padding short rows with empty cells.
    pub fn new(rows: Vec<Vec<String>>, halign: HAlign) -> Self {
        let n_columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(n_columns, String::new());
                row
            })
            .collect();
        let options = match halign {
            HAlign::Left => CellOptions::LEFT,
            HAlign::Center => CellOptions::CENTER,
            _ => CellOptions::empty(),
        };
        Self {
            n_columns,
            rows,
            options,
            style: AreaStyle::aligned(halign, VAlign::Top),
        }
    }

    /// A 1x1 table holding `text`.
    pub fn single(text: impl Into<String>, halign: HAlign) -> Self {
        Self::new(vec![vec![text.into()]], halign)
    }

    /// One row per footnote: marker, then content.
    pub fn from_footnotes(footnotes: &[Footnote<'_>]) -> Self {
        let rows = footnotes
            .iter()
            .map(|f| vec![f.marker.to_string(), f.content.to_string()])
            .collect();
        Self::new(rows, HAlign::Left)
    }

    pub fn with_style(mut self, style: AreaStyle) -> Self {
        self.style = style;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.n_columns == 0
    }
}

impl TableProvider for TextTable {
    fn n(&self, axis: Axis) -> usize {
        match axis {
            Axis::H => self.n_columns,
            Axis::V => self.rows.len(),
        }
    }

    fn get_cell(&self, x: usize, y: usize) -> TableCell<'_> {
        TableCell::single(x, y, &self.rows[y][x], self.options, &self.style)
    }

    fn get_rule(&self, _axis: Axis, _x: usize, _y: usize) -> BorderStyle {
        BorderStyle::NONE
    }
}
