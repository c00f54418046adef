use crate::environment::LayoutEnvironment;
use crate::measure::FixedPitchMeasurer;
use std::sync::Arc;
use tabula_style::LayoutStyle;
use tabula_table::{CellOptions, RuleCode, Stroke, Table};
use tabula_types::PerAxis;

/// Height of one line of the default font under the fixed-pitch measurer.
pub const LINE: i32 = 12 * 1024;
/// Vertical cell margins of the default cell style.
pub const CELL_MARGIN_V: i32 = 2 * 72 * 1024 / 96;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// An environment with a body of `width` by `height` units.
pub fn env_with_body(width: i32, height: i32) -> LayoutEnvironment {
    let style = LayoutStyle {
        size: PerAxis::new(width, height),
        min_break: PerAxis::new(width / 2, height / 2),
        ..LayoutStyle::default()
    };
    LayoutEnvironment::new(Arc::new(style), Arc::new(FixedPitchMeasurer::default()))
}

/// A table whose cells read `r{y}c{x}`, optionally boxed with solid rules.
pub fn numbered_table(columns: usize, rows: usize, ruled: bool) -> Table {
    let mut table = Table::new(columns, rows);
    for y in 0..rows {
        for x in 0..columns {
            table
                .set_text_formatted(x, y, CellOptions::LEFT, format_args!("r{y}c{x}"))
                .unwrap();
        }
    }
    if ruled && columns > 0 && rows > 0 {
        let solid = Some(RuleCode::from(Stroke::Solid));
        table
            .draw_box(solid, solid, solid, solid, 0, 0, columns - 1, rows - 1)
            .unwrap();
    }
    table
}
