//! Per-item layout state: measured once, then drained slice by slice.

use crate::LayoutError;
use crate::algorithms::pagination::{Band, SliceCursor, SliceLimits, SlicePlan, plan_slice};
use crate::elements::{Clipped, Surface};
use crate::environment::LayoutEnvironment;
use crate::geometry::TableGeometry;
use crate::item::{OutputItem, SharedItem, TextKind};
use crate::measure::TextLine;
use crate::painting::box_painter::{TextStyle, paint_lines, paint_rows};
use tabula_style::{FontDescription, HAlign};
use tabula_table::{TableProvider, TextTable};
use tabula_types::{Axis, Color, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    Unmeasured,
    Measured,
    Draining(SliceCursor),
    Drained,
}

#[derive(Debug)]
enum TableSource {
    /// The item's own table.
    Body,
    Owned(TextTable),
}

#[derive(Debug)]
enum Block {
    Table {
        source: TableSource,
        geometry: TableGeometry,
    },
    Text {
        lines: Vec<TextLine>,
        font: FontDescription,
        color: Color,
        halign: HAlign,
        line_height: i32,
    },
}

/// What a band paints: rows of a table block or lines of a text block.
#[derive(Debug, Clone, Copy)]
struct BandContent {
    block: usize,
    range: [usize; 2],
}

fn provider<'a>(item: &'a OutputItem, source: &'a TableSource) -> Option<&'a dyn TableProvider> {
    match (source, item) {
        (TableSource::Owned(table), _) => Some(table as &dyn TableProvider),
        (TableSource::Body, OutputItem::Table(table)) => Some(table.table.as_ref()),
        (TableSource::Body, _) => None,
    }
}

/// Lays out one output item.
///
/// Nothing is measured until the first call that needs a size. Slices are
/// drawn with their top at `y = 0` of the surface they are given.
#[derive(Debug)]
pub struct ItemLayout {
    item: SharedItem,
    env: LayoutEnvironment,
    state: LayoutState,
    blocks: Vec<Block>,
    bands: Vec<Band>,
    contents: Vec<BandContent>,
    /// Height of repeated header rows, per block.
    fixed: Vec<i32>,
    size: Size,
}

impl ItemLayout {
    pub fn new(item: SharedItem, env: LayoutEnvironment) -> Result<Self, LayoutError> {
        if !item.has_layout() {
            return Err(LayoutError::NoLayout(item.kind_name()));
        }
        Ok(Self {
            item,
            env,
            state: LayoutState::Unmeasured,
            blocks: Vec::new(),
            bands: Vec::new(),
            contents: Vec::new(),
            fixed: Vec::new(),
            size: Size::zero(),
        })
    }

    pub fn item(&self) -> &SharedItem {
        &self.item
    }

    pub fn state(&self) -> LayoutState {
        self.state
    }

    /// Natural size of the item, measuring it on first use.
    pub fn measure(&mut self) -> Size {
        if self.state == LayoutState::Unmeasured {
            self.build();
            self.state = LayoutState::Measured;
            log::debug!(
                "measured {} item: {}x{} in {} bands",
                self.item.kind_name(),
                self.size.width,
                self.size.height,
                self.bands.len()
            );
        }
        self.size
    }

    /// An item is empty when it has nothing to draw. Page breaks are never
    /// empty.
    pub fn is_empty(&mut self) -> bool {
        !matches!(*self.item, OutputItem::PageBreak) && self.measure().height == 0
    }

    pub fn is_drained(&self) -> bool {
        self.state == LayoutState::Drained
    }

    /// Paints the whole item without touching the slice cursor.
    pub fn draw_all(&mut self, surface: &mut dyn Surface) {
        self.measure();
        let mut y = 0;
        for block in 0..self.blocks.len() {
            y += self.paint_block(surface, block, None, false, y);
        }
    }

    /// Paints only what intersects `region`.
    pub fn draw_region(&mut self, surface: &mut dyn Surface, region: Rect) {
        let mut clipped = Clipped::new(surface, region);
        self.draw_all(&mut clipped);
    }

    /// Paints the next slice into at most `space` and returns the height
    /// consumed. Zero means nothing more fits here.
    pub fn draw_slice(&mut self, surface: &mut dyn Surface, space: i32) -> Result<i32, LayoutError> {
        self.measure();
        let cursor = match self.state {
            LayoutState::Drained => return Err(LayoutError::Drained(self.item.kind_name())),
            LayoutState::Draining(cursor) => cursor,
            LayoutState::Unmeasured | LayoutState::Measured => SliceCursor::default(),
        };
        let body = self.env.style.body(Axis::V);

        if matches!(*self.item, OutputItem::PageBreak) {
            if space >= body {
                self.state = LayoutState::Drained;
            }
            return Ok(0);
        }

        let limits = SliceLimits {
            space,
            body,
            min_break: self.env.style.min_break[Axis::V],
        };
        let plan = plan_slice(&self.bands, &self.fixed, cursor, limits);
        log::trace!("{} item slice at {:?} into {}: {:?}", self.item.kind_name(), cursor, space, plan);
        match plan {
            SlicePlan::Done => {
                self.state = LayoutState::Drained;
                return Ok(0);
            }
            SlicePlan::Defer => {
                self.state = LayoutState::Draining(cursor);
                return Ok(0);
            }
            SlicePlan::Bands { start, end, .. } => self.paint_bands(surface, start, end),
            SlicePlan::Partial { band, from, to } => {
                let width = self.size.width.max(self.env.style.size[Axis::H]);
                let mut clipped = Clipped::new(surface, Rect::new(0, 0, width, to - from));
                let content = self.contents[band];
                self.paint_block(&mut clipped, content.block, Some(content.range), false, -from);
            }
        }

        let next = plan.advance(&self.bands, cursor);
        self.state = if next.band >= self.bands.len() {
            LayoutState::Drained
        } else {
            LayoutState::Draining(next)
        };
        Ok(plan.height())
    }

    fn paint_bands(&self, surface: &mut dyn Surface, start: usize, end: usize) {
        let mut y = 0;
        let mut i = start;
        while i < end {
            let block = self.contents[i].block;
            let mut j = i;
            while j < end && self.contents[j].block == block {
                j += 1;
            }
            let range = [self.contents[i].range[0], self.contents[j - 1].range[1]];
            y += self.paint_block(surface, block, Some(range), true, y);
            i = j;
        }
    }

    /// Paints part of a block at `top`, or all of it when `range` is
    /// `None`. With `headers`, header rows repeat around a table range.
    fn paint_block(
        &self,
        surface: &mut dyn Surface,
        block: usize,
        range: Option<[usize; 2]>,
        headers: bool,
        top: i32,
    ) -> i32 {
        match &self.blocks[block] {
            Block::Table { source, geometry } => {
                let Some(table) = provider(&self.item, source) else {
                    return 0;
                };
                let n = geometry.n(Axis::V);
                let Some(range) = range else {
                    return paint_rows(surface, table, geometry, &self.env, [0, n], top);
                };
                if !headers {
                    return paint_rows(surface, table, geometry, &self.env, range, top);
                }
                let [h0, h1] = geometry.headers(Axis::V);
                let mut y = top;
                y += paint_rows(surface, table, geometry, &self.env, [0, h0], y);
                y += paint_rows(surface, table, geometry, &self.env, range, y);
                y += paint_rows(surface, table, geometry, &self.env, [n - h1, n], y);
                y - top
            }
            Block::Text {
                lines,
                font,
                color,
                halign,
                line_height,
            } => {
                let [a, b] = range.unwrap_or([0, lines.len()]);
                let style = TextStyle {
                    font,
                    color: *color,
                    halign: *halign,
                    underline: false,
                    line_height: *line_height,
                };
                paint_lines(surface, &lines[a..b], &style, 0, self.env.style.size[Axis::H], top)
            }
        }
    }

    fn build(&mut self) {
        let item = self.item.clone();
        match &*item {
            OutputItem::Table(table) => {
                if let Some(title) = &table.title {
                    self.push_table(TableSource::Owned(TextTable::single(title.clone(), HAlign::Center)));
                }
                self.push_table(TableSource::Body);
                if let Some(caption) = &table.caption {
                    self.push_table(TableSource::Owned(TextTable::single(caption.clone(), HAlign::Left)));
                }
                let footnotes = table.table.footnotes();
                if !footnotes.is_empty() {
                    self.push_table(TableSource::Owned(TextTable::from_footnotes(&footnotes)));
                }
            }
            OutputItem::Text(text) => {
                let (font, halign) = self.text_font(text.kind);
                self.push_text(&text.text, font, halign);
            }
            OutputItem::Message(message) => {
                let (font, halign) = self.text_font(TextKind::Log);
                self.push_text(&message.to_string(), font, halign);
            }
            OutputItem::PageBreak | OutputItem::PageSetup(_) | OutputItem::Group(_) => {}
        }
        self.size.height = self.bands.iter().map(|b| b.height).sum::<i32>() + self.fixed.iter().sum::<i32>();
    }

    fn text_font(&self, kind: TextKind) -> (FontDescription, HAlign) {
        let mut font = self.env.style.font.clone();
        match kind {
            TextKind::Title => {
                font.bold = true;
                (font, HAlign::Center)
            }
            TextKind::Log | TextKind::Syntax => {
                font.family = "Monospace".to_string();
                (font, HAlign::Left)
            }
            TextKind::PageTitle => (font, HAlign::Left),
        }
    }

    fn push_table(&mut self, source: TableSource) {
        let Some(table) = provider(&self.item, &source) else {
            return;
        };
        let geometry = TableGeometry::measure(table, &self.env);
        if geometry.height() == 0 {
            return;
        }
        let block = self.blocks.len();
        let n = geometry.n(Axis::V);
        let [h0, h1] = geometry.headers(Axis::V);
        self.fixed.push(geometry.rows_height(0, h0) + geometry.rows_height(n - h1, n));

        let mut start = h0;
        for y in h0 + 1..=n - h1 {
            if y == n - h1 || geometry.can_break_before(y) {
                self.bands.push(Band {
                    group: block,
                    height: geometry.rows_height(start, y),
                });
                self.contents.push(BandContent {
                    block,
                    range: [start, y],
                });
                start = y;
            }
        }
        self.size.width = self.size.width.max(geometry.width());
        self.blocks.push(Block::Table { source, geometry });
    }

    fn push_text(&mut self, text: &str, font: FontDescription, halign: HAlign) {
        let width = self.env.style.size[Axis::H];
        let lines = self.env.measurer.wrap(text, &font, width);
        if lines.is_empty() {
            return;
        }
        let block = self.blocks.len();
        let line_height = self.env.measurer.line_height(&font);
        self.fixed.push(0);
        for i in 0..lines.len() {
            self.bands.push(Band {
                group: block,
                height: line_height,
            });
            self.contents.push(BandContent {
                block,
                range: [i, i + 1],
            });
        }
        self.size.width = self
            .size
            .width
            .max(lines.iter().map(|l| l.width).max().unwrap_or(0));
        self.blocks.push(Block::Text {
            lines,
            font,
            color: self.env.style.fg,
            halign,
            line_height,
        });
    }
}
