//! Page setup, running headings and the page style derived from them.

use crate::area::HAlign;
use crate::dimension::{Margins, Orientation, PaperSize};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tabula_types::{Axis, PerAxis, inches_to_units};

/// One paragraph of a running page heading.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageParagraph {
    /// Text of the paragraph, possibly containing `&[Page]` style variables.
    pub markup: String,
    pub halign: HAlign,
}

impl PageParagraph {
    pub fn new(markup: impl Into<String>, halign: HAlign) -> Self {
        Self {
            markup: markup.into(),
            halign,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageHeading {
    pub paragraphs: Vec<PageParagraph>,
}

impl PageHeading {
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

/// Page geometry and headings as submitted in a page-setup item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageSetup {
    pub paper: PaperSize,
    pub orientation: Orientation,
    pub margins: Margins,
    /// Header (index 0) and footer (index 1).
    pub headings: [PageHeading; 2],
    pub initial_page_number: u32,
    /// Vertical space between consecutive items, in inches.
    pub object_spacing: f64,
    /// Width and height of charts, in inches.
    pub chart_size: (f64, f64),
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            paper: PaperSize::default(),
            orientation: Orientation::default(),
            margins: Margins::default(),
            headings: Default::default(),
            initial_page_number: 1,
            object_spacing: 12.0 / 72.0,
            chart_size: (4.0, 3.0),
        }
    }
}

impl PageSetup {
    /// Paper width and height in inches after applying the orientation.
    pub fn paper_in(&self) -> (f64, f64) {
        let (w, h) = self.paper.dimensions_in();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    /// Paper size in layout units, indexed by axis.
    pub fn paper_units(&self) -> PerAxis<i32> {
        let (w, h) = self.paper_in();
        PerAxis::new(inches_to_units(w), inches_to_units(h))
    }

    /// Margins in layout units, `[start, end]` per axis.
    pub fn margin_units(&self) -> PerAxis<[i32; 2]> {
        let scale = |axis| self.margins.along(axis).map(inches_to_units);
        PerAxis::new(scale(Axis::H), scale(Axis::V))
    }
}

/// Margins, headings and numbering of physical pages.
#[derive(Debug, Clone, Default)]
pub struct PageStyle {
    /// Margins in layout units, `[start, end]` per axis.
    pub margins: PerAxis<[i32; 2]>,
    pub headings: [PageHeading; 2],
    pub initial_page_number: u32,
    /// Record outline entries for group items.
    pub include_outline: bool,
}

impl PartialEq for PageStyle {
    fn eq(&self, other: &Self) -> bool {
        self.margins == other.margins
            && self.headings == other.headings
            && self.initial_page_number == other.initial_page_number
    }
}

/// Expands `&[Name]` page variables in heading text.
///
/// `&[Page]` becomes the page number; other names are looked up in `vars`
/// and left untouched when unknown.
pub fn substitute_page_variables(
    text: &str,
    page_number: u32,
    vars: &HashMap<String, String>,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("&[") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find(']') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        match name {
            "Page" => out.push_str(&page_number.to_string()),
            _ => match vars.get(name) {
                Some(value) => out.push_str(value),
                None => out.push_str(&rest[start..start + 2 + end + 1]),
            },
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}
