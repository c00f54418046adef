use crate::arena::{JoinId, JoinedCell, TableArena, TextRef};
use crate::cell::{CellOptions, TableCell};
use crate::error::TableError;
use crate::footnote::{Footnote, FootnoteId, FootnoteRecord};
use crate::provider::TableProvider;
use crate::rule::{BorderStyle, RuleCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use tabula_style::AreaStyle;
use tabula_types::{Axis, Color, PerAxis};

/// Number of entries in the style and rule color palettes.
pub const PALETTE_SIZE: usize = 8;

/// What a table does when an operation names coordinates outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundsPolicy {
    /// Return a [`TableError`].
    #[default]
    Strict,
    /// Log a warning, leave the table unchanged and return `Ok(())`.
    Tolerant,
}

#[derive(Debug, Clone, Copy, Default)]
enum CellSlot {
    #[default]
    Empty,
    Text(TextRef),
    Joined(JoinId),
}

/// An editable grid of cells with rules between them.
///
/// The number of rows and columns is fixed at creation. Rules are stored
/// between cells: `rh` holds `n_columns * (n_rows + 1)` horizontal rules and
/// `rv` holds `(n_columns + 1) * n_rows` vertical ones.
#[derive(Debug)]
pub struct Table {
    n: PerAxis<usize>,
    headers: PerAxis<[usize; 2]>,
    cells: Vec<CellSlot>,
    opts: Vec<CellOptions>,
    rh: Vec<RuleCode>,
    rv: Vec<RuleCode>,
    styles: [Option<AreaStyle>; PALETTE_SIZE],
    rule_colors: [Color; PALETTE_SIZE],
    policy: BoundsPolicy,
    arena: TableArena,
}

impl Table {
    /// Creates an empty `n_columns` by `n_rows` table with no rules.
    pub fn new(n_columns: usize, n_rows: usize) -> Self {
        let n_cells = n_columns * n_rows;
        Self {
            n: PerAxis::new(n_columns, n_rows),
            headers: PerAxis::default(),
            cells: vec![CellSlot::Empty; n_cells],
            opts: vec![CellOptions::empty(); n_cells],
            rh: vec![RuleCode::NONE; n_columns * (n_rows + 1)],
            rv: vec![RuleCode::NONE; (n_columns + 1) * n_rows],
            styles: Default::default(),
            rule_colors: [Color::BLACK; PALETTE_SIZE],
            policy: BoundsPolicy::default(),
            arena: TableArena::new(),
        }
    }

    pub fn with_policy(mut self, policy: BoundsPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> BoundsPolicy {
        self.policy
    }

    pub fn n_columns(&self) -> usize {
        self.n[Axis::H]
    }

    pub fn n_rows(&self) -> usize {
        self.n[Axis::V]
    }

    pub fn arena(&self) -> &TableArena {
        &self.arena
    }

    fn violation(&self, error: TableError) -> Result<(), TableError> {
        match self.policy {
            BoundsPolicy::Strict => Err(error),
            BoundsPolicy::Tolerant => {
                log::warn!("Ignoring table operation: {}", error);
                Ok(())
            }
        }
    }

    fn out_of_bounds(&self, x: usize, y: usize) -> TableError {
        TableError::OutOfBounds {
            x,
            y,
            n_columns: self.n_columns(),
            n_rows: self.n_rows(),
        }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        x + y * self.n_columns()
    }

    /// Validates an inclusive rectangle of cells, returning the error to
    /// report if it is not inside the grid.
    fn check_rect(&self, x1: usize, y1: usize, x2: usize, y2: usize) -> Option<TableError> {
        if x1 > x2 || y1 > y2 {
            Some(TableError::InvalidSpan { x1, y1, x2, y2 })
        } else if x2 >= self.n_columns() || y2 >= self.n_rows() {
            Some(self.out_of_bounds(x2, y2))
        } else {
            None
        }
    }

    /// Declares the number of header columns (left, right) and rows (top,
    /// bottom) that repeat when the table is broken across pages.
    pub fn set_headers(
        &mut self,
        left: usize,
        right: usize,
        top: usize,
        bottom: usize,
    ) -> Result<(), TableError> {
        if left + right > self.n_columns() || top + bottom > self.n_rows() {
            return self.violation(TableError::InvalidHeaders {
                left,
                right,
                top,
                bottom,
            });
        }
        self.headers = PerAxis::new([left, right], [top, bottom]);
        Ok(())
    }

    /// Sets the vertical rules left of column `x` for rows `y1..=y2`.
    pub fn draw_vline(
        &mut self,
        style: Option<RuleCode>,
        x: usize,
        y1: usize,
        y2: usize,
    ) -> Result<(), TableError> {
        if y1 > y2 {
            return self.violation(TableError::InvalidSpan { x1: x, y1, x2: x, y2 });
        }
        if x > self.n_columns() || y2 >= self.n_rows() {
            return self.violation(self.out_of_bounds(x, y2));
        }
        if let Some(code) = style {
            let stride = self.n_columns() + 1;
            for y in y1..=y2 {
                self.rv[x + stride * y] = code;
            }
        }
        Ok(())
    }

    /// Sets the horizontal rules above row `y` for columns `x1..=x2`.
    pub fn draw_hline(
        &mut self,
        style: Option<RuleCode>,
        x1: usize,
        x2: usize,
        y: usize,
    ) -> Result<(), TableError> {
        if x1 > x2 {
            return self.violation(TableError::InvalidSpan { x1, y1: y, x2, y2: y });
        }
        if y > self.n_rows() || x2 >= self.n_columns() {
            return self.violation(self.out_of_bounds(x2, y));
        }
        if let Some(code) = style {
            let stride = self.n_columns();
            for x in x1..=x2 {
                self.rh[x + stride * y] = code;
            }
        }
        Ok(())
    }

    /// Draws the border of the inclusive rectangle `(x1, y1)-(x2, y2)` with
    /// the outer styles and its interior rules with the inner styles. `_h`
    /// styles apply to horizontal rules and `_v` styles to vertical rules;
    /// `None` leaves those rules as they are.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_box(
        &mut self,
        outer_h: Option<RuleCode>,
        outer_v: Option<RuleCode>,
        inner_h: Option<RuleCode>,
        inner_v: Option<RuleCode>,
        x1: usize,
        y1: usize,
        x2: usize,
        y2: usize,
    ) -> Result<(), TableError> {
        if let Some(error) = self.check_rect(x1, y1, x2, y2) {
            return self.violation(error);
        }
        let nc = self.n_columns();

        if let Some(code) = outer_h {
            for x in x1..=x2 {
                self.rh[x + nc * y1] = code;
                self.rh[x + nc * (y2 + 1)] = code;
            }
        }
        if let Some(code) = outer_v {
            for y in y1..=y2 {
                self.rv[x1 + (nc + 1) * y] = code;
                self.rv[(x2 + 1) + (nc + 1) * y] = code;
            }
        }
        if let Some(code) = inner_h {
            for y in y1 + 1..=y2 {
                for x in x1..=x2 {
                    self.rh[x + nc * y] = code;
                }
            }
        }
        if let Some(code) = inner_v {
            for x in x1 + 1..=x2 {
                for y in y1..=y2 {
                    self.rv[x + (nc + 1) * y] = code;
                }
            }
        }
        Ok(())
    }

    /// Replaces the text and options of cell `(x, y)`.
    pub fn set_text(
        &mut self,
        x: usize,
        y: usize,
        options: CellOptions,
        text: &str,
    ) -> Result<(), TableError> {
        if x >= self.n_columns() || y >= self.n_rows() {
            return self.violation(self.out_of_bounds(x, y));
        }
        let text = self.arena.alloc_str(text);
        let index = self.index(x, y);
        self.cells[index] = CellSlot::Text(text);
        self.opts[index] = options - CellOptions::JOIN;
        Ok(())
    }

    /// Like [`Table::set_text`], formatting the text in place.
    ///
    /// ```
    /// # use tabula_table::{CellOptions, Table};
    /// let mut table = Table::new(1, 1);
    /// table.set_text_formatted(0, 0, CellOptions::empty(), format_args!("{:.1}", 2.25)).unwrap();
    /// ```
    pub fn set_text_formatted(
        &mut self,
        x: usize,
        y: usize,
        options: CellOptions,
        args: fmt::Arguments<'_>,
    ) -> Result<(), TableError> {
        match args.as_str() {
            Some(s) => self.set_text(x, y, options, s),
            None => self.set_text(x, y, options, &args.to_string()),
        }
    }

    /// Joins the inclusive rectangle `(x1, y1)-(x2, y2)` into one cell
    /// holding `text`. A 1x1 rectangle is the same as [`Table::set_text`].
    #[allow(clippy::too_many_arguments)]
    pub fn join(
        &mut self,
        x1: usize,
        y1: usize,
        x2: usize,
        y2: usize,
        options: CellOptions,
        text: &str,
    ) -> Result<(), TableError> {
        if let Some(error) = self.check_rect(x1, y1, x2, y2) {
            return self.violation(error);
        }
        if x1 == x2 && y1 == y2 {
            return self.set_text(x1, y1, options, text);
        }

        self.draw_box(
            None,
            None,
            Some(RuleCode::NONE),
            Some(RuleCode::NONE),
            x1,
            y1,
            x2,
            y2,
        )?;

        let text = self.arena.alloc_str(text);
        let options = options | CellOptions::JOIN;
        let id = self.arena.alloc_joined(JoinedCell {
            span: PerAxis::new([x1, x2 + 1], [y1, y2 + 1]),
            text,
            options,
            footnotes: Vec::new(),
            style: None,
        });
        for y in y1..=y2 {
            for x in x1..=x2 {
                let index = self.index(x, y);
                self.cells[index] = CellSlot::Joined(id);
                self.opts[index] = options;
            }
        }
        log::trace!("joined cells ({}, {})-({}, {})", x1, y1, x2, y2);
        Ok(())
    }

    /// Returns the joined cell at `(x, y)`, promoting a plain cell to a 1x1
    /// joined cell that keeps its text.
    fn promote(&mut self, x: usize, y: usize) -> JoinId {
        let index = self.index(x, y);
        match self.cells[index] {
            CellSlot::Joined(id) => id,
            slot => {
                let text = match slot {
                    CellSlot::Text(text) => text,
                    _ => self.arena.alloc_str(""),
                };
                let options = self.opts[index] | CellOptions::JOIN;
                let id = self.arena.alloc_joined(JoinedCell {
                    span: PerAxis::new([x, x + 1], [y, y + 1]),
                    text,
                    options,
                    footnotes: Vec::new(),
                    style: None,
                });
                self.cells[index] = CellSlot::Joined(id);
                self.opts[index] = options;
                id
            }
        }
    }

    /// Creates a footnote owned by this table. Indexes are assigned in
    /// creation order.
    pub fn create_footnote(
        &mut self,
        content: &str,
        marker: &str,
        style: Option<AreaStyle>,
    ) -> FootnoteId {
        let content = self.arena.alloc_str(content);
        let marker = self.arena.alloc_str(marker);
        let style = style.map(|style| self.arena.alloc_style(style));
        self.arena.alloc_footnote(FootnoteRecord {
            content,
            marker,
            style,
        })
    }

    pub fn attach_footnote(
        &mut self,
        x: usize,
        y: usize,
        footnote: FootnoteId,
    ) -> Result<(), TableError> {
        if x >= self.n_columns() || y >= self.n_rows() {
            return self.violation(self.out_of_bounds(x, y));
        }
        if self.arena.footnote(footnote).is_none() {
            return self.violation(TableError::UnknownFootnote(footnote.index()));
        }
        let id = self.promote(x, y);
        self.arena.joined_mut(id).footnotes.push(footnote);
        Ok(())
    }

    /// Overrides the style of the cell at `(x, y)` (the whole span if it is
    /// joined).
    pub fn attach_style(&mut self, x: usize, y: usize, style: AreaStyle) -> Result<(), TableError> {
        if x >= self.n_columns() || y >= self.n_rows() {
            return self.violation(self.out_of_bounds(x, y));
        }
        let id = self.promote(x, y);
        let style = self.arena.alloc_style(style);
        self.arena.joined_mut(id).style = Some(style);
        Ok(())
    }

    /// Sets entry `index` of the style palette referenced by
    /// [`CellOptions::with_style`].
    pub fn set_style(&mut self, index: usize, style: AreaStyle) -> Result<(), TableError> {
        if index >= PALETTE_SIZE {
            return self.violation(TableError::PaletteIndex(index));
        }
        self.styles[index] = Some(style);
        Ok(())
    }

    /// Sets entry `index` of the rule color palette referenced by
    /// [`RuleCode::new`].
    pub fn set_rule_color(&mut self, index: usize, color: Color) -> Result<(), TableError> {
        if index >= PALETTE_SIZE {
            return self.violation(TableError::PaletteIndex(index));
        }
        self.rule_colors[index] = color;
        Ok(())
    }

    /// True if the cell has no text, either directly or through its joined
    /// cell. Out-of-range coordinates are empty.
    pub fn is_empty(&self, x: usize, y: usize) -> bool {
        if x >= self.n_columns() || y >= self.n_rows() {
            return true;
        }
        match self.cells[self.index(x, y)] {
            CellSlot::Empty => true,
            CellSlot::Text(text) => self.arena.str(text).is_empty(),
            CellSlot::Joined(id) => self.arena.str(self.arena.joined(id).text).is_empty(),
        }
    }

    fn palette_style(&self, options: CellOptions) -> &AreaStyle {
        match &self.styles[options.style_index()] {
            Some(style) => style,
            None => AreaStyle::for_alignment(options.halign(), options.valign()),
        }
    }

    fn resolve_footnote(&self, id: FootnoteId) -> Option<Footnote<'_>> {
        let record = self.arena.footnote(id)?;
        Some(Footnote {
            index: id.index(),
            content: self.arena.str(record.content),
            marker: self.arena.str(record.marker),
            style: record.style.map(|s| self.arena.style(s)),
        })
    }
}

impl TableProvider for Table {
    fn n(&self, axis: Axis) -> usize {
        self.n[axis]
    }

    fn headers(&self, axis: Axis) -> [usize; 2] {
        self.headers[axis]
    }

    fn get_cell(&self, x: usize, y: usize) -> TableCell<'_> {
        let index = self.index(x, y);
        let options = self.opts[index];
        match self.cells[index] {
            CellSlot::Empty => TableCell::single(x, y, "", options, self.palette_style(options)),
            CellSlot::Text(text) => TableCell::single(
                x,
                y,
                self.arena.str(text),
                options,
                self.palette_style(options),
            ),
            CellSlot::Joined(id) => {
                let joined = self.arena.joined(id);
                let style = match joined.style {
                    Some(style) => self.arena.style(style),
                    None => self.palette_style(joined.options),
                };
                TableCell {
                    span: joined.span,
                    text: self.arena.str(joined.text),
                    options: joined.options,
                    style,
                    footnotes: joined
                        .footnotes
                        .iter()
                        .filter_map(|&f| self.resolve_footnote(f))
                        .collect(),
                }
            }
        }
    }

    fn get_rule(&self, axis: Axis, x: usize, y: usize) -> BorderStyle {
        let code = match axis {
            Axis::V => self.rh[x + self.n_columns() * y],
            Axis::H => self.rv[x + (self.n_columns() + 1) * y],
        };
        BorderStyle {
            stroke: code.stroke(),
            color: self.rule_colors[code.color_index()],
        }
    }

    fn footnotes(&self) -> Vec<Footnote<'_>> {
        (0..self.arena.footnotes().len())
            .filter_map(|i| self.resolve_footnote(FootnoteId(i)))
            .collect()
    }
}
