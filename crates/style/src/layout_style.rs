//! Body geometry and look shared by the layout engine and the pager.

use crate::font::FontDescription;
use crate::dimension::{Margins, Orientation, PaperSize};
use crate::page::{PageSetup, PageStyle};
use serde::{Deserialize, Serialize};
use tabula_types::{Axis, Color, PerAxis, inches_to_units};

/// Size of the page body, break thresholds, fonts and colors.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutStyle {
    /// Page body size in layout units.
    pub size: PerAxis<i32>,
    /// Minimum extent, per axis, at which content may be split.
    pub min_break: PerAxis<i32>,
    pub font: FontDescription,
    pub fg: Color,
    pub bg: Color,
    pub use_system_colors: bool,
    /// Vertical space between items in layout units.
    pub object_spacing: i32,
    /// Dots per inch used when converting pixel sizes.
    pub font_resolution: f64,
}

impl Default for LayoutStyle {
    fn default() -> Self {
        StyleOptions::default().to_styles(&PageSetup::default()).1
    }
}

impl LayoutStyle {
    pub fn body(&self, axis: Axis) -> i32 {
        self.size[axis]
    }
}

/// Driver options that shape the look of paged output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StyleOptions {
    /// Font description such as `Sans Serif 10`.
    pub font: String,
    pub foreground_color: Color,
    pub background_color: Color,
    pub systemcolors: bool,
    pub outline: bool,
    pub font_resolution: f64,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            font: "Sans Serif 10".to_string(),
            foreground_color: Color::BLACK,
            background_color: Color::WHITE,
            systemcolors: false,
            outline: false,
            font_resolution: 72.0,
        }
    }
}

impl StyleOptions {
    /// Derives the page and layout styles for `setup`.
    ///
    /// The body is the paper minus the margins on each axis, and the minimum
    /// break is half the body. Margins that leave no body fall back to the
    /// default paper and margins.
    pub fn to_styles(&self, setup: &PageSetup) -> (PageStyle, LayoutStyle) {
        let paper = setup.paper_units();
        let margins = setup.margin_units();

        let mut size = PerAxis::default();
        let mut min_break = PerAxis::default();
        for axis in Axis::ALL {
            let [start, end] = margins[axis];
            size[axis] = paper[axis] - start - end;
            min_break[axis] = size[axis] / 2;
        }
        if Axis::ALL.into_iter().any(|axis| size[axis] <= 0) {
            let fallback = PageSetup {
                paper: PaperSize::default(),
                orientation: Orientation::default(),
                margins: Margins::default(),
                ..setup.clone()
            };
            if fallback.paper != setup.paper
                || fallback.orientation != setup.orientation
                || fallback.margins != setup.margins
            {
                log::warn!(
                    "margins {:?} leave no room on {:?} paper; using the default page geometry",
                    setup.margins,
                    setup.paper
                );
                return self.to_styles(&fallback);
            }
        }

        let page_style = PageStyle {
            margins,
            headings: setup.headings.clone(),
            initial_page_number: setup.initial_page_number,
            include_outline: self.outline,
        };
        let layout_style = LayoutStyle {
            size,
            min_break,
            font: FontDescription::parse_or_default(&self.font),
            fg: self.foreground_color,
            bg: self.background_color,
            use_system_colors: self.systemcolors,
            object_spacing: inches_to_units(setup.object_spacing),
            font_resolution: self.font_resolution,
        };
        (page_style, layout_style)
    }
}
