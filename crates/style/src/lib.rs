pub mod area;
pub mod dimension;
pub mod font;
pub mod layout_style;
pub mod page;
pub mod parsers;

pub use area::{AreaStyle, CellStyle, FontStyle, HAlign, VAlign};
pub use dimension::{Margins, Orientation, PaperSize};
pub use font::FontDescription;
pub use layout_style::{LayoutStyle, StyleOptions};
pub use page::{PageHeading, PageParagraph, PageSetup, PageStyle, substitute_page_variables};
pub use parsers::StyleParseError;

use std::sync::Arc;

/// Returns a mutable reference to the style behind `style`, cloning it first
/// if any other holder shares it.
pub fn unshare<T: Clone>(style: &mut Arc<T>) -> &mut T {
    Arc::make_mut(style)
}
