use crate::cell::TableCell;
use crate::footnote::Footnote;
use crate::rule::BorderStyle;
use std::fmt::Debug;
use tabula_types::Axis;

/// Read access to a table, independent of how it is stored.
///
/// Coordinates passed to `get_cell` must be in range; `get_rule` accepts
/// `x <= n(H)` for vertical rules and `y <= n(V)` for horizontal ones.
pub trait TableProvider: Debug {
    /// Number of columns (`Axis::H`) or rows (`Axis::V`).
    fn n(&self, axis: Axis) -> usize;

    /// Leading and trailing header columns or rows.
    fn headers(&self, _axis: Axis) -> [usize; 2] {
        [0, 0]
    }

    fn get_cell(&self, x: usize, y: usize) -> TableCell<'_>;

    /// The rule on `axis` at `(x, y)`.
    ///
    /// `Axis::V` rules separate rows: the rule at `(x, y)` runs along the top
    /// of row `y` under column `x`. `Axis::H` rules separate columns: the
    /// rule at `(x, y)` runs along the left of column `x` in row `y`.
    fn get_rule(&self, axis: Axis, x: usize, y: usize) -> BorderStyle;

    /// Footnotes defined by this table, in index order.
    fn footnotes(&self) -> Vec<Footnote<'_>> {
        Vec::new()
    }

    /// Releases the table and everything it allocated.
    fn destroy(self: Box<Self>) {
        log::trace!("destroying {}x{} table", self.n(Axis::H), self.n(Axis::V));
    }
}
