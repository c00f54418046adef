//! Column widths, row heights and rule widths of a table.
//!
//! Positions along each axis are kept in a `cp` array of `2n + 2` entries
//! alternating rules and cells: `cp[2z]..cp[2z + 1]` is rule `z` and
//! `cp[2z + 1]..cp[2z + 2]` is cell `z`.

use crate::environment::LayoutEnvironment;
use bumpalo::Bump;
use bumpalo::collections::Vec as BumpVec;
use tabula_style::FontDescription;
use tabula_table::{TableCell, TableProvider};
use tabula_types::{Axis, PerAxis};

const MIN: usize = 0;
const MAX: usize = 1;

#[derive(Debug, Clone, Copy, Default)]
struct RowWidth {
    /// Widest cell that sits in this row or column alone.
    unspanned: i32,
    width: i32,
}

/// A cell anchor gathered during measurement.
struct MeasuredCell {
    span: PerAxis<[usize; 2]>,
    text: String,
    font: FontDescription,
    margins: PerAxis<i32>,
    width: [i32; 2],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableGeometry {
    n: PerAxis<usize>,
    headers: PerAxis<[usize; 2]>,
    cp: PerAxis<Vec<i32>>,
    /// `crossed[y]` is true when some cell spans the boundary above row `y`.
    crossed: Vec<bool>,
}

/// Spreads `width` over the rows of a span: half evenly, half in
/// proportion to their unspanned widths. `rules[0]` is the rule before the
/// first row of the span.
fn distribute_spanned_width(width: i32, rows: &mut [RowWidth], rules: &[i32]) {
    let n = rows.len();
    let total_unspanned: i64 = rows.iter().map(|r| r.unspanned as i64).sum::<i64>()
        + (1..n).map(|x| rules[x] as i64).sum::<i64>();
    if total_unspanned >= width as i64 {
        return;
    }

    // Exact integer arithmetic over a common denominator, carrying the
    // remainder from one row to the next.
    let width = width as i64;
    let d0 = n as i64;
    let d1 = 2 * total_unspanned.max(1);
    let mut d = d0 * d1;
    if total_unspanned > 0 {
        d *= 2;
    }
    let mut w = d / 2;
    for x in 0..n {
        w += width * d1;
        if total_unspanned > 0 {
            let mut unspanned = rows[x].unspanned as i64 * 2;
            if x < n - 1 {
                unspanned += rules[x + 1] as i64;
            }
            if x > 0 {
                unspanned += rules[x] as i64;
            }
            w += width * unspanned * d0;
        }
        rows[x].width = rows[x].width.max((w / d) as i32);
        w -= rows[x].width as i64 * d;
    }
}

fn accumulate(rows: &[RowWidth], rules: &[i32]) -> Vec<i32> {
    let n = rows.len();
    let mut cp = Vec::with_capacity(2 * n + 2);
    cp.push(0);
    for z in 0..n {
        let start = cp[2 * z];
        cp.push(start + rules[z]);
        cp.push(start + rules[z] + rows[z].width);
    }
    cp.push(cp[2 * n] + rules[n]);
    cp
}

fn total_width(rows: &[RowWidth], rules: &[i32]) -> i32 {
    rows.iter().map(|r| r.width).sum::<i32>() + rules.iter().sum::<i32>()
}

/// Fits `min..max` column widths into `available` by sharing out the
/// leftover space in proportion to each column's range.
fn interpolate(
    min: &[RowWidth],
    max: &[RowWidth],
    w_min: i32,
    w_max: i32,
    available: i32,
    rules: &[i32],
) -> Vec<i32> {
    let n = min.len();
    let avail = (available - w_min) as i64;
    let wanted = (w_max - w_min).max(1) as i64;
    let mut cp = Vec::with_capacity(2 * n + 2);
    cp.push(0);
    let mut w = wanted / 2;
    for x in 0..n {
        w += avail * (max[x].width - min[x].width) as i64;
        let extra = w / wanted;
        w -= extra * wanted;
        let start = cp[2 * x];
        cp.push(start + rules[x]);
        cp.push(start + rules[x] + min[x].width + extra as i32);
    }
    cp.push(cp[2 * n] + rules[n]);
    cp
}

impl TableGeometry {
    /// Measures `table` for the body width in `env`.
    pub fn measure(table: &dyn TableProvider, env: &LayoutEnvironment) -> Self {
        let n = PerAxis::new(table.n(Axis::H), table.n(Axis::V));
        let (nc, nr) = (n[Axis::H], n[Axis::V]);
        let rules = PerAxis::new(
            (0..=nc).map(|z| measure_rule(table, env, Axis::H, z)).collect::<Vec<_>>(),
            (0..=nr).map(|z| measure_rule(table, env, Axis::V, z)).collect::<Vec<_>>(),
        );

        let bump = Bump::new();
        let mut cells = BumpVec::new_in(&bump);
        let mut crossed = vec![false; nr + 1];
        for y in 0..nr {
            let mut x = 0;
            while x < nc {
                let cell = table.get_cell(x, y);
                let next = cell.span[Axis::H][1].max(x + 1);
                if cell.span[Axis::V][0] == y {
                    let [y0, y1] = cell.span[Axis::V];
                    for boundary in y0 + 1..y1.min(nr) {
                        crossed[boundary] = true;
                    }
                    cells.push(Self::measure_cell(&cell, env));
                }
                x = next;
            }
        }

        // Column widths from unspanned cells, then spanned ones.
        let mut columns = [
            BumpVec::from_iter_in(std::iter::repeat_n(RowWidth::default(), nc), &bump),
            BumpVec::from_iter_in(std::iter::repeat_n(RowWidth::default(), nc), &bump),
        ];
        for cell in cells.iter().filter(|c| extent(c.span, Axis::H) == 1) {
            let x = cell.span[Axis::H][0];
            for i in [MIN, MAX] {
                let column = &mut columns[i][x];
                column.unspanned = column.unspanned.max(cell.width[i]);
            }
        }
        for column in columns.iter_mut().flat_map(|c| c.iter_mut()) {
            column.width = column.unspanned;
        }
        for cell in cells.iter().filter(|c| extent(c.span, Axis::H) > 1) {
            let [x0, x1] = cell.span[Axis::H];
            for i in [MIN, MAX] {
                distribute_spanned_width(cell.width[i], &mut columns[i][x0..x1], &rules[Axis::H][x0..x1]);
            }
        }
        for x in 0..nc {
            if columns[MIN][x].width > columns[MAX][x].width {
                columns[MAX][x].width = columns[MIN][x].width;
            }
        }

        let available = env.style.size[Axis::H];
        let widths = [
            total_width(&columns[MIN], &rules[Axis::H]),
            total_width(&columns[MAX], &rules[Axis::H]),
        ];
        let cp_h = if widths[MAX] <= available {
            accumulate(&columns[MAX], &rules[Axis::H])
        } else if widths[MIN] <= available {
            interpolate(&columns[MIN], &columns[MAX], widths[MIN], widths[MAX], available, &rules[Axis::H])
        } else {
            log::debug!(
                "table minimum width {} exceeds body width {}",
                widths[MIN],
                available
            );
            accumulate(&columns[MIN], &rules[Axis::H])
        };

        // Row heights at the chosen widths.
        let joined_width = |[x0, x1]: [usize; 2]| cp_h[2 * x1] - cp_h[2 * x0 + 1];
        let mut rows = BumpVec::from_iter_in(std::iter::repeat_n(RowWidth::default(), nr), &bump);
        let mut heights = BumpVec::with_capacity_in(cells.len(), &bump);
        for cell in cells.iter() {
            let content = (joined_width(cell.span[Axis::H]) - cell.margins[Axis::H]).max(0);
            let h = env.measurer.height(&cell.text, &cell.font, content) + cell.margins[Axis::V];
            heights.push(h);
        }
        for (cell, &h) in cells.iter().zip(heights.iter()) {
            if extent(cell.span, Axis::V) == 1 {
                let row = &mut rows[cell.span[Axis::V][0]];
                if h > row.unspanned {
                    row.unspanned = h;
                    row.width = h;
                }
            }
        }
        for (cell, &h) in cells.iter().zip(heights.iter()) {
            if extent(cell.span, Axis::V) > 1 {
                let [y0, y1] = cell.span[Axis::V];
                distribute_spanned_width(h, &mut rows[y0..y1], &rules[Axis::V][y0..y1]);
            }
        }
        let cp_v = accumulate(&rows, &rules[Axis::V]);

        let mut geometry = TableGeometry {
            n,
            headers: PerAxis::new(table.headers(Axis::H), table.headers(Axis::V)),
            cp: PerAxis::new(cp_h, cp_v),
            crossed,
        };
        geometry.drop_oversized_headers(env, &cells);
        geometry
    }

    fn measure_cell(cell: &TableCell<'_>, env: &LayoutEnvironment) -> MeasuredCell {
        let font = env.cell_font(cell.style);
        let text = cell.display_text();
        let margins = PerAxis::new(
            env.cell_margins(cell.style, Axis::H),
            env.cell_margins(cell.style, Axis::V),
        );
        let (min, max) = env.measurer.width_range(&text, &font);
        MeasuredCell {
            span: cell.span,
            text,
            font,
            margins,
            width: [min + margins[Axis::H], max + margins[Axis::H]],
        }
    }

    /// Headers are dropped on an axis when they would leave too little room
    /// for the body, or when a cell spans out of them.
    fn drop_oversized_headers(&mut self, env: &LayoutEnvironment, cells: &[MeasuredCell]) {
        for axis in Axis::ALL {
            let [h0, h1] = self.headers[axis];
            if h0 + h1 == 0 {
                continue;
            }
            let n = self.n[axis];
            let size = env.style.size[axis];
            let hw = self.axis_width(axis, 0, 2 * h0 + 1)
                + self.axis_width(axis, 2 * (n - h1), 2 * n + 1);
            let max_cell = (h0..n - h1)
                .map(|z| self.cell_extent(axis, z))
                .max()
                .unwrap_or(0);
            let straddles = cells.iter().any(|c| {
                let [start, end] = c.span[axis];
                (h0 > 0 && start < h0 && end > h0) || (h1 > 0 && start < n - h1 && end > n - h1)
            });
            if hw * 2 >= size || hw + max_cell > size || straddles || h0 + h1 >= n {
                log::debug!("dropping {:?} headers {:?}", axis, self.headers[axis]);
                self.headers[axis] = [0, 0];
            }
        }
    }

    fn axis_width(&self, axis: Axis, from: usize, to: usize) -> i32 {
        self.cp[axis][to] - self.cp[axis][from]
    }

    pub fn n(&self, axis: Axis) -> usize {
        self.n[axis]
    }

    /// Effective header counts after dropping oversized headers.
    pub fn headers(&self, axis: Axis) -> [usize; 2] {
        self.headers[axis]
    }

    /// Total extent along `axis`, including the outer rules. An empty table
    /// has no extent.
    pub fn extent(&self, axis: Axis) -> i32 {
        if self.n[Axis::H] == 0 || self.n[Axis::V] == 0 {
            return 0;
        }
        self.cp[axis][2 * self.n[axis] + 1]
    }

    pub fn width(&self) -> i32 {
        self.extent(Axis::H)
    }

    pub fn height(&self) -> i32 {
        self.extent(Axis::V)
    }

    /// Start of rule `z` along `axis`.
    pub fn rule_start(&self, axis: Axis, z: usize) -> i32 {
        self.cp[axis][2 * z]
    }

    pub fn rule_width(&self, axis: Axis, z: usize) -> i32 {
        self.axis_width(axis, 2 * z, 2 * z + 1)
    }

    /// Start of cell `z` along `axis`.
    pub fn cell_start(&self, axis: Axis, z: usize) -> i32 {
        self.cp[axis][2 * z + 1]
    }

    pub fn cell_extent(&self, axis: Axis, z: usize) -> i32 {
        self.axis_width(axis, 2 * z + 1, 2 * z + 2)
    }

    /// Extent of cells `z0..z1` and the rules between them.
    pub fn joined_extent(&self, axis: Axis, [z0, z1]: [usize; 2]) -> i32 {
        self.axis_width(axis, 2 * z0 + 1, 2 * z1)
    }

    /// Height of rows `y0..y1` with the rule above each, plus the bottom
    /// rule when `y1` is the last row.
    pub fn rows_height(&self, y0: usize, y1: usize) -> i32 {
        if y0 >= y1 {
            return 0;
        }
        let end = if y1 == self.n[Axis::V] { 2 * y1 + 1 } else { 2 * y1 };
        self.axis_width(Axis::V, 2 * y0, end)
    }

    /// True if no cell spans the boundary above row `y`.
    pub fn can_break_before(&self, y: usize) -> bool {
        !self.crossed.get(y).copied().unwrap_or(false)
    }
}

fn extent(span: PerAxis<[usize; 2]>, axis: Axis) -> usize {
    let [start, end] = span[axis];
    end - start
}

/// Width of rule line `z` along `axis`: the widest stroke anywhere on it.
fn measure_rule(table: &dyn TableProvider, env: &LayoutEnvironment, axis: Axis, z: usize) -> i32 {
    let other = axis.opposite();
    (0..table.n(other))
        .map(|w| {
            let (x, y) = match axis {
                Axis::H => (z, w),
                Axis::V => (w, z),
            };
            env.line_width(table.get_rule(axis, x, y).stroke)
        })
        .max()
        .unwrap_or(0)
}
