//! Delimited-text output: every table is written in full, one line per
//! row, without pagination.

mod driver;
mod field;
mod options;

pub use driver::CsvDriver;
pub use field::CsvField;
pub use options::CsvOptions;
