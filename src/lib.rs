//! Table and text output.
//!
//! A [`Document`] describes output items; an [`OutputEngine`] hands each
//! item to its drivers: delimited text, paginated JSON pages, or a JSON
//! archive log. The table model, layout and pagination live in the
//! `tabula-*` crates re-exported here.

pub mod archive;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod paged;

pub use archive::JsonArchiveWriter;
pub use config::{DriverConfig, OutputFormat, PagedOptions, fold_pairs};
pub use document::{Document, ItemSpec, TableSpec};
pub use engine::{OutputEngine, create_driver};
pub use error::OutputError;
pub use paged::{JsonPageSink, MemoryPageSink, PageInfo, PageSink, PageSurface, PagedDriver};

pub use tabula_csv as csv;
pub use tabula_layout as layout;
pub use tabula_pager as pager;
pub use tabula_render_core as render;
pub use tabula_style as style;
pub use tabula_table as table;
pub use tabula_tex as tex;
pub use tabula_types as types;
