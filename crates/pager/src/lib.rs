//! Page assembly: headings, page breaks, outline entries and the draining
//! loop that pulls slices out of item layouts.

use tabula_layout::LayoutError;
use thiserror::Error;

mod heading;
mod iterator;
mod pager;

pub use self::heading::HeadingBlock;
pub use self::iterator::PageIterator;
pub use self::pager::{OutlineEntry, Pager};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PagerError {
    #[error("cannot create page surface: {0}")]
    Surface(String),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("{kind} item does not fit an empty page body of {body} units")]
    NoRoom { kind: &'static str, body: i32 },
}

#[cfg(test)]
mod pager_test;
