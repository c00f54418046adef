use crate::error::RenderError;
use tabula_layout::{GroupItem, OutputItem, SharedItem, TableItem, TextItem, TextKind};
use tabula_style::PageSetup;

/// A backend that consumes output items in submission order.
pub trait OutputDriver {
    fn name(&self) -> &str;

    fn submit(&mut self, item: &SharedItem) -> Result<(), RenderError>;

    /// Pushes out anything buffered without ending the output.
    fn flush(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    /// Ends the output. No items are submitted afterwards.
    fn finish(&mut self) -> Result<(), RenderError>;
}

/// The primitive operations of a structured archive backend. The byte
/// format is the implementor's business.
pub trait ArchiveWriter {
    fn open(&mut self) -> Result<(), RenderError>;

    fn close(&mut self) -> Result<(), RenderError>;

    fn put_table(&mut self, table: &TableItem) -> Result<(), RenderError>;

    fn put_text(&mut self, text: &TextItem) -> Result<(), RenderError>;

    /// Stores an encoded image. Backends without image support reject it.
    fn put_image(&mut self, name: &str, _data: &[u8]) -> Result<(), RenderError> {
        log::debug!("dropping image {name}");
        Err(RenderError::Unsupported {
            driver: "archive".to_string(),
            what: "images",
        })
    }

    fn open_heading(&mut self, label: &str) -> Result<(), RenderError>;

    fn close_heading(&mut self) -> Result<(), RenderError>;

    fn eject_page(&mut self) -> Result<(), RenderError>;

    fn set_page_setup(&mut self, setup: &PageSetup) -> Result<(), RenderError>;

    /// Stores one item through the primitive calls above.
    fn write(&mut self, item: &OutputItem) -> Result<(), RenderError> {
        match item {
            OutputItem::Table(table) => self.put_table(table),
            OutputItem::Text(text) => self.put_text(text),
            OutputItem::Message(message) => self.put_text(&TextItem {
                kind: TextKind::Log,
                text: message.to_string(),
            }),
            OutputItem::PageBreak => self.eject_page(),
            OutputItem::PageSetup(setup) => self.set_page_setup(setup),
            OutputItem::Group(GroupItem::Open { label }) => self.open_heading(label),
            OutputItem::Group(GroupItem::Close) => self.close_heading(),
        }
    }
}
