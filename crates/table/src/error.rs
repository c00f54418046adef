use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Coordinate ({x}, {y}) is outside the {n_columns}x{n_rows} table.")]
    OutOfBounds {
        x: usize,
        y: usize,
        n_columns: usize,
        n_rows: usize,
    },
    #[error("Invalid span ({x1}, {y1})-({x2}, {y2}): corners are out of order.")]
    InvalidSpan {
        x1: usize,
        y1: usize,
        x2: usize,
        y2: usize,
    },
    #[error("Headers ({left}+{right} columns, {top}+{bottom} rows) do not fit the table.")]
    InvalidHeaders {
        left: usize,
        right: usize,
        top: usize,
        bottom: usize,
    },
    #[error("Palette index {0} is out of range.")]
    PaletteIndex(usize),
    #[error("Footnote {0} does not belong to this table.")]
    UnknownFootnote(usize),
}
