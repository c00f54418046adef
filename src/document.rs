//! The JSON document format: a list of items, with tables described by
//! their cells, joins, rules and footnotes.

use crate::error::OutputError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tabula_layout::{GroupItem, Message, OutputItem, Severity, SharedItem, TableItem, TextKind};
use tabula_style::{AreaStyle, HAlign, PageSetup, VAlign};
use tabula_table::{BoundsPolicy, CellOptions, RuleCode, Stroke, Table};
use tabula_types::Color;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    /// Applied before the first item.
    pub page_setup: Option<PageSetup>,
    pub items: Vec<ItemSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemSpec {
    Table(TableSpec),
    Text {
        #[serde(default = "default_text_kind")]
        kind: TextKind,
        text: String,
    },
    Message {
        #[serde(default)]
        severity: Severity,
        text: String,
    },
    PageBreak,
    PageSetup(PageSetup),
    /// Wraps `items` in a group open/close pair.
    Group {
        label: String,
        #[serde(default)]
        items: Vec<ItemSpec>,
    },
}

fn default_text_kind() -> TextKind {
    TextKind::Log
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSpec {
    /// Defaults to the longest row of `data`.
    pub columns: Option<usize>,
    /// Defaults to the number of rows of `data`.
    pub rows: Option<usize>,
    pub policy: BoundsPolicy,
    pub title: Option<String>,
    pub caption: Option<String>,
    /// Cell texts, titles and captions are TeX fragments.
    pub tex: bool,
    pub headers: HeaderSpec,
    /// Style palette referenced by `style` indexes.
    pub styles: Vec<AreaStyle>,
    /// Rule color palette referenced by `color` indexes.
    pub rule_colors: Vec<Color>,
    /// Row-major cell texts, left aligned.
    pub data: Vec<Vec<String>>,
    pub cells: Vec<CellSpec>,
    pub joins: Vec<JoinSpec>,
    pub boxes: Vec<BoxSpec>,
    pub rules: Vec<RuleSpec>,
    pub footnotes: Vec<FootnoteSpec>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderSpec {
    pub left: usize,
    pub right: usize,
    pub top: usize,
    pub bottom: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Alignment {
    pub halign: HAlign,
    pub valign: VAlign,
    pub style: Option<usize>,
}

impl Alignment {
    fn options(&self) -> CellOptions {
        let mut options = match self.halign {
            HAlign::Left => CellOptions::LEFT,
            HAlign::Center => CellOptions::CENTER,
            HAlign::Right | HAlign::Mixed | HAlign::Decimal { .. } => CellOptions::empty(),
        };
        match self.valign {
            VAlign::Center => options |= CellOptions::MIDDLE,
            VAlign::Bottom => options |= CellOptions::BOTTOM,
            VAlign::Top => {}
        }
        match self.style {
            Some(index) => options.with_style(index),
            None => options,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellSpec {
    pub x: usize,
    pub y: usize,
    pub text: String,
    #[serde(flatten)]
    pub align: Alignment,
}

/// An inclusive rectangle of cells joined into one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinSpec {
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
    pub text: String,
    #[serde(flatten)]
    pub align: Alignment,
}

/// Rules around and inside an inclusive rectangle. Missing strokes leave
/// the rules as they are.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxSpec {
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
    #[serde(default)]
    pub outer: Option<Stroke>,
    #[serde(default)]
    pub inner: Option<Stroke>,
    #[serde(default)]
    pub color: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleDirection {
    /// Above row `at`, over columns `from..=to`.
    Horizontal,
    /// Left of column `at`, over rows `from..=to`.
    Vertical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSpec {
    pub direction: RuleDirection,
    pub at: usize,
    pub from: usize,
    pub to: usize,
    pub stroke: Stroke,
    #[serde(default)]
    pub color: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FootnoteSpec {
    pub marker: String,
    pub content: String,
    /// `[x, y]` cells the footnote is attached to.
    #[serde(default)]
    pub cells: Vec<[usize; 2]>,
}

impl Document {
    pub fn from_json(json: &str) -> Result<Self, OutputError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the output items in submission order.
    pub fn to_items(&self) -> Result<Vec<SharedItem>, OutputError> {
        let mut items = Vec::new();
        if let Some(setup) = &self.page_setup {
            items.push(Arc::new(OutputItem::PageSetup(setup.clone())));
        }
        for spec in &self.items {
            spec.push_items(&mut items)?;
        }
        log::debug!("document holds {} items", items.len());
        Ok(items)
    }
}

impl ItemSpec {
    fn push_items(&self, items: &mut Vec<SharedItem>) -> Result<(), OutputError> {
        let item = match self {
            ItemSpec::Table(spec) => OutputItem::Table(spec.build()?),
            ItemSpec::Text { kind, text } => OutputItem::text(*kind, text.clone()),
            ItemSpec::Message { severity, text } => OutputItem::Message(Message {
                severity: *severity,
                text: text.clone(),
            }),
            ItemSpec::PageBreak => OutputItem::PageBreak,
            ItemSpec::PageSetup(setup) => OutputItem::PageSetup(setup.clone()),
            ItemSpec::Group { label, items: children } => {
                items.push(Arc::new(OutputItem::Group(GroupItem::Open {
                    label: label.clone(),
                })));
                for child in children {
                    child.push_items(items)?;
                }
                OutputItem::Group(GroupItem::Close)
            }
        };
        items.push(Arc::new(item));
        Ok(())
    }
}

impl TableSpec {
    fn text(&self, text: &str) -> Result<String, OutputError> {
        if self.tex {
            Ok(tabula_tex::transliterate(text)?)
        } else {
            Ok(text.to_string())
        }
    }

    /// Creates the table. Operations run in field order: palettes, data,
    /// cells, joins, boxes, rules, footnotes, headers.
    pub fn build(&self) -> Result<TableItem, OutputError> {
        let columns = self
            .columns
            .unwrap_or_else(|| self.data.iter().map(Vec::len).max().unwrap_or(0));
        let rows = self.rows.unwrap_or(self.data.len());
        let mut table = Table::new(columns, rows).with_policy(self.policy);

        for (index, style) in self.styles.iter().enumerate() {
            table.set_style(index, style.clone())?;
        }
        for (index, color) in self.rule_colors.iter().enumerate() {
            table.set_rule_color(index, *color)?;
        }
        for (y, row) in self.data.iter().enumerate() {
            for (x, text) in row.iter().enumerate() {
                table.set_text(x, y, CellOptions::LEFT, &self.text(text)?)?;
            }
        }
        for cell in &self.cells {
            table.set_text(cell.x, cell.y, cell.align.options(), &self.text(&cell.text)?)?;
        }
        for join in &self.joins {
            table.join(
                join.x1,
                join.y1,
                join.x2,
                join.y2,
                join.align.options(),
                &self.text(&join.text)?,
            )?;
        }
        for b in &self.boxes {
            let code = |stroke: Option<Stroke>| stroke.map(|s| RuleCode::new(s, b.color));
            table.draw_box(
                code(b.outer),
                code(b.outer),
                code(b.inner),
                code(b.inner),
                b.x1,
                b.y1,
                b.x2,
                b.y2,
            )?;
        }
        for rule in &self.rules {
            let code = Some(RuleCode::new(rule.stroke, rule.color));
            match rule.direction {
                RuleDirection::Horizontal => table.draw_hline(code, rule.from, rule.to, rule.at)?,
                RuleDirection::Vertical => table.draw_vline(code, rule.at, rule.from, rule.to)?,
            }
        }
        for spec in &self.footnotes {
            let footnote = table.create_footnote(&self.text(&spec.content)?, &spec.marker, None);
            for &[x, y] in &spec.cells {
                table.attach_footnote(x, y, footnote)?;
            }
        }
        let h = self.headers;
        table.set_headers(h.left, h.right, h.top, h.bottom)?;

        let mut item = TableItem::new(Box::new(table));
        if let Some(title) = &self.title {
            item = item.with_title(self.text(title)?);
        }
        if let Some(caption) = &self.caption {
            item = item.with_caption(self.text(caption)?);
        }
        Ok(item)
    }
}
