//! The table model consumed by every output driver.
//!
//! [`Table`] is the editable grid; [`TableProvider`] is the read-only
//! protocol that layout and the delimited-text encoder use, so derived
//! tables such as [`TextTable`] feed the same consumers.

mod arena;
mod cell;
mod error;
mod footnote;
mod provider;
mod rule;
mod table;
mod text_table;

pub use arena::TableArena;
pub use cell::{CellOptions, TableCell};
pub use error::TableError;
pub use footnote::{Footnote, FootnoteId};
pub use provider::TableProvider;
pub use rule::{BorderStyle, RuleCode, Stroke};
pub use table::{BoundsPolicy, PALETTE_SIZE, Table};
pub use text_table::TextTable;
