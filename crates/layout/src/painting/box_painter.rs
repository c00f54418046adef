use crate::elements::{
    FillElement, LayoutElement, PositionedElement, RuleElement, Surface, TextElement,
};
use crate::environment::LayoutEnvironment;
use crate::geometry::TableGeometry;
use crate::measure::TextLine;
use tabula_style::{FontDescription, HAlign, VAlign};
use tabula_table::{Stroke, TableCell, TableProvider};
use tabula_types::{Axis, Color, Rect};

/// Paints rows `y0..y1` of a table with the top of row `y0`'s rule at
/// `top`, and returns the painted height.
///
/// Each row brings the rule above it; the bottom rule comes with the last
/// row of the table.
pub fn paint_rows(
    surface: &mut dyn Surface,
    table: &dyn TableProvider,
    geometry: &TableGeometry,
    env: &LayoutEnvironment,
    [y0, y1]: [usize; 2],
    top: i32,
) -> i32 {
    if y0 >= y1 {
        return 0;
    }
    let painter = RowPainter {
        table,
        geometry,
        env,
        y0,
        dy: top - geometry.rule_start(Axis::V, y0),
    };
    let n_rows = geometry.n(Axis::V);
    for y in y0..y1 {
        painter.horizontal_rule(surface, y);
        if y + 1 == n_rows {
            painter.horizontal_rule(surface, n_rows);
        }
        for x in 0..=geometry.n(Axis::H) {
            painter.vertical_rule(surface, x, y);
        }
        painter.cells(surface, y);
    }
    geometry.rows_height(y0, y1)
}

struct RowPainter<'a> {
    table: &'a dyn TableProvider,
    geometry: &'a TableGeometry,
    env: &'a LayoutEnvironment,
    y0: usize,
    dy: i32,
}

impl RowPainter<'_> {
    fn horizontal_rule(&self, surface: &mut dyn Surface, z: usize) {
        let height = self.geometry.rule_width(Axis::V, z);
        if height == 0 {
            return;
        }
        let y = self.geometry.rule_start(Axis::V, z) + self.dy;
        for x in 0..self.geometry.n(Axis::H) {
            let rule = self.table.get_rule(Axis::V, x, z);
            if rule.stroke == Stroke::None {
                continue;
            }
            let left = self.geometry.rule_start(Axis::H, x);
            let right = self.geometry.rule_start(Axis::H, x + 1) + self.geometry.rule_width(Axis::H, x + 1);
            surface.draw(PositionedElement::new(
                Rect::new(left, y, right - left, height),
                LayoutElement::Rule(RuleElement {
                    axis: Axis::H,
                    stroke: rule.stroke,
                    color: rule.color,
                }),
            ));
        }
    }

    fn vertical_rule(&self, surface: &mut dyn Surface, x: usize, y: usize) {
        let width = self.geometry.rule_width(Axis::H, x);
        let rule = self.table.get_rule(Axis::H, x, y);
        if width == 0 || rule.stroke == Stroke::None {
            return;
        }
        surface.draw(PositionedElement::new(
            Rect::new(
                self.geometry.rule_start(Axis::H, x),
                self.geometry.cell_start(Axis::V, y) + self.dy,
                width,
                self.geometry.cell_extent(Axis::V, y),
            ),
            LayoutElement::Rule(RuleElement {
                axis: Axis::V,
                stroke: rule.stroke,
                color: rule.color,
            }),
        ));
    }

    fn cells(&self, surface: &mut dyn Surface, y: usize) {
        let n_columns = self.geometry.n(Axis::H);
        let mut x = 0;
        while x < n_columns {
            let cell = self.table.get_cell(x, y);
            let next = cell.span[Axis::H][1].max(x + 1);
            let start = cell.span[Axis::V][0];
            if start == y || (y == self.y0 && start < y) {
                self.cell(surface, &cell);
            }
            x = next;
        }
    }

    fn cell(&self, surface: &mut dyn Surface, cell: &TableCell<'_>) {
        let g = self.geometry;
        let [y0, y1] = cell.span[Axis::V];
        let rows = [y0, y1.min(g.n(Axis::V))];
        let columns = [cell.span[Axis::H][0], cell.span[Axis::H][1].min(g.n(Axis::H))];
        let bounds = Rect::new(
            g.cell_start(Axis::H, columns[0]),
            g.cell_start(Axis::V, rows[0]) + self.dy,
            g.joined_extent(Axis::H, columns),
            g.joined_extent(Axis::V, rows),
        );

        let style = cell.style;
        let stripe = y0 % 2;
        let bg = style.font.bg[stripe];
        if bg != self.env.style.bg {
            surface.draw(PositionedElement::new(
                bounds,
                LayoutElement::Fill(FillElement { color: bg }),
            ));
        }

        let content = Rect::new(
            bounds.x + self.env.cell_margin_start(style, Axis::H),
            bounds.y + self.env.cell_margin_start(style, Axis::V),
            (bounds.width - self.env.cell_margins(style, Axis::H)).max(0),
            (bounds.height - self.env.cell_margins(style, Axis::V)).max(0),
        );
        let font = self.env.cell_font(style);
        let lines = self.env.measurer.wrap(&cell.display_text(), &font, content.width);
        let line_height = self.env.measurer.line_height(&font);
        let total = lines.len() as i32 * line_height;
        let top = match style.cell.valign {
            VAlign::Top => content.y,
            VAlign::Center => content.y + (content.height - total).max(0) / 2,
            VAlign::Bottom => content.y + (content.height - total).max(0),
        };
        let text = TextStyle {
            font: &font,
            color: style.font.fg[stripe],
            halign: style.cell.halign,
            underline: style.font.underline,
            line_height,
        };
        paint_lines(surface, &lines, &text, content.x, content.width, top);
    }
}

/// How a run of lines is set.
pub struct TextStyle<'a> {
    pub font: &'a FontDescription,
    pub color: Color,
    pub halign: HAlign,
    pub underline: bool,
    pub line_height: i32,
}

/// Paints `lines` one below the other inside the column `left..left + width`.
pub fn paint_lines(
    surface: &mut dyn Surface,
    lines: &[TextLine],
    style: &TextStyle<'_>,
    left: i32,
    width: i32,
    top: i32,
) -> i32 {
    let mut y = top;
    for line in lines {
        let x = match style.halign {
            HAlign::Left => left,
            HAlign::Center => left + (width - line.width) / 2,
            HAlign::Right | HAlign::Mixed | HAlign::Decimal { .. } => left + width - line.width,
        };
        if !line.text.is_empty() {
            surface.draw(PositionedElement::new(
                Rect::new(x, y, line.width, style.line_height),
                LayoutElement::Text(TextElement {
                    content: line.text.clone(),
                    font: style.font.clone(),
                    color: style.color,
                    halign: style.halign,
                    underline: style.underline,
                }),
            ));
        }
        y += style.line_height;
    }
    y - top
}
