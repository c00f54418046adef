use crate::measure::TextMeasurer;
use std::sync::Arc;
use tabula_style::{AreaStyle, FontDescription, LayoutStyle};
use tabula_table::Stroke;
use tabula_types::{Axis, UNITS_PER_POINT, px_to_units};

/// Everything layout needs besides the item itself.
#[derive(Debug, Clone)]
pub struct LayoutEnvironment {
    pub style: Arc<LayoutStyle>,
    pub measurer: Arc<dyn TextMeasurer>,
}

impl LayoutEnvironment {
    pub fn new(style: Arc<LayoutStyle>, measurer: Arc<dyn TextMeasurer>) -> Self {
        Self { style, measurer }
    }

    /// Width of a rule drawn with `stroke`.
    pub fn line_width(&self, stroke: Stroke) -> i32 {
        match stroke {
            Stroke::None => 0,
            Stroke::Thin => UNITS_PER_POINT / 2,
            Stroke::Solid | Stroke::Dashed => UNITS_PER_POINT,
            Stroke::Thick => UNITS_PER_POINT * 2,
            Stroke::Double => UNITS_PER_POINT * 3,
        }
    }

    pub fn cell_font(&self, style: &AreaStyle) -> FontDescription {
        self.style.font.with_overrides(&style.font)
    }

    /// Sum of a cell style's margins along `axis`, in layout units.
    pub fn cell_margins(&self, style: &AreaStyle, axis: Axis) -> i32 {
        px_to_units(style.cell.margin_sum(axis))
    }

    /// The start margin of a cell style along `axis`, in layout units.
    pub fn cell_margin_start(&self, style: &AreaStyle, axis: Axis) -> i32 {
        px_to_units(style.cell.margins[axis][0])
    }
}
