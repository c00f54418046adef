//! Paginated output: a [`Pager`] fills surfaces that a [`PageSink`]
//! provides and ships.

use crate::config::PagedOptions;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use tabula_layout::{
    FixedPitchMeasurer, PositionedElement, RecordingSurface, SharedItem, Surface, TextMeasurer,
};
use tabula_pager::{OutlineEntry, Pager};
use tabula_render_core::{OutputDriver, RenderError};
use tabula_style::{LayoutStyle, PageStyle};
use tabula_types::Axis;

/// Size and number of a page about to be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub number: u32,
    pub width: i32,
    pub height: i32,
}

impl PageInfo {
    fn new(number: u32, page: &PageStyle, layout: &LayoutStyle) -> Self {
        let extent = |axis: Axis| {
            let [start, end] = page.margins[axis];
            start + layout.size[axis] + end
        };
        Self {
            number,
            width: extent(Axis::H),
            height: extent(Axis::V),
        }
    }
}

/// Where pages come from and where finished pages go.
pub trait PageSink {
    type Surface: Surface;

    fn new_surface(&mut self, info: PageInfo) -> Result<Self::Surface, RenderError>;

    fn show_page(&mut self, surface: Self::Surface) -> Result<(), RenderError>;

    /// Called once after the last page, with the document outline.
    fn finish(&mut self, _outline: &[OutlineEntry]) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Drives a [`Pager`] with the pages of a [`PageSink`].
pub struct PagedDriver<K: PageSink> {
    name: String,
    pager: Pager<K::Surface>,
    sink: K,
}

impl<K: PageSink> PagedDriver<K> {
    pub fn new(name: impl Into<String>, options: &PagedOptions, sink: K) -> Self {
        Self::with_measurer(name, options, sink, Arc::new(FixedPitchMeasurer::default()))
    }

    pub fn with_measurer(
        name: impl Into<String>,
        options: &PagedOptions,
        sink: K,
        measurer: Arc<dyn TextMeasurer>,
    ) -> Self {
        let (page_style, layout_style) = options.style.to_styles(&options.setup);
        let mut pager = Pager::new(Arc::new(page_style), Arc::new(layout_style), measurer);
        if let Some(title) = &options.title {
            pager.set_variable("Title", title.clone());
        }
        Self {
            name: name.into(),
            pager,
            sink,
        }
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    pub fn page_count(&self) -> u32 {
        self.pager.page_count()
    }

    fn next_page(&mut self) -> Result<(), RenderError> {
        if let Some(page) = self.pager.finish_page() {
            self.sink.show_page(page)?;
        }
        let info = PageInfo::new(
            self.pager.page_count() + 1,
            self.pager.page_style(),
            self.pager.layout_style(),
        );
        let surface = self.sink.new_surface(info)?;
        self.pager.add_page(surface)?;
        Ok(())
    }
}

impl<K: PageSink> OutputDriver for PagedDriver<K> {
    fn name(&self) -> &str {
        &self.name
    }

    fn submit(&mut self, item: &SharedItem) -> Result<(), RenderError> {
        self.pager.add_item(item.clone())?;
        while self.pager.needs_new_page() {
            self.next_page()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        if let Some(page) = self.pager.finish_page() {
            self.sink.show_page(page)?;
        }
        log::debug!("{}: {} pages", self.name, self.pager.page_count());
        self.sink.finish(self.pager.outline())
    }
}

/// A page being drawn: its geometry plus everything painted on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageSurface {
    #[serde(flatten)]
    pub info: Option<PageInfo>,
    pub elements: Vec<PositionedElement>,
}

impl PageSurface {
    pub fn new(info: PageInfo) -> Self {
        Self {
            info: Some(info),
            elements: Vec::new(),
        }
    }
}

impl Surface for PageSurface {
    fn draw(&mut self, element: PositionedElement) {
        self.elements.push(element);
    }
}

/// Keeps finished pages in memory.
#[derive(Debug, Default)]
pub struct MemoryPageSink {
    pub pages: Vec<RecordingSurface>,
    pub outline: Vec<OutlineEntry>,
}

impl PageSink for MemoryPageSink {
    type Surface = RecordingSurface;

    fn new_surface(&mut self, _info: PageInfo) -> Result<RecordingSurface, RenderError> {
        Ok(RecordingSurface::new())
    }

    fn show_page(&mut self, surface: RecordingSurface) -> Result<(), RenderError> {
        self.pages.push(surface);
        Ok(())
    }

    fn finish(&mut self, outline: &[OutlineEntry]) -> Result<(), RenderError> {
        self.outline = outline.to_vec();
        Ok(())
    }
}

/// Writes each page as one JSON document, followed by an `outline`
/// document when the outline is not empty.
#[derive(Debug)]
pub struct JsonPageSink<W: Write> {
    out: W,
    pretty: bool,
}

impl JsonPageSink<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>, pretty: bool) -> Result<Self, RenderError> {
        let file = File::create(path.as_ref())?;
        Ok(Self::new(BufWriter::new(file), pretty))
    }
}

impl<W: Write> JsonPageSink<W> {
    pub fn new(out: W, pretty: bool) -> Self {
        Self { out, pretty }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit<T: Serialize>(&mut self, value: &T) -> Result<(), RenderError> {
        let encoded = if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, value)
        } else {
            serde_json::to_writer(&mut self.out, value)
        };
        encoded.map_err(|e| RenderError::Encode(e.to_string()))?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> PageSink for JsonPageSink<W> {
    type Surface = PageSurface;

    fn new_surface(&mut self, info: PageInfo) -> Result<PageSurface, RenderError> {
        Ok(PageSurface::new(info))
    }

    fn show_page(&mut self, surface: PageSurface) -> Result<(), RenderError> {
        self.emit(&surface)
    }

    fn finish(&mut self, outline: &[OutlineEntry]) -> Result<(), RenderError> {
        if !outline.is_empty() {
            #[derive(Serialize)]
            struct Outline<'a> {
                outline: &'a [OutlineEntry],
            }
            self.emit(&Outline { outline })?;
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_layout::{OutputItem, TextKind};

    fn text(s: &str) -> SharedItem {
        Arc::new(OutputItem::text(TextKind::Log, s))
    }

    #[test]
    fn page_break_starts_a_second_page() {
        let mut driver = PagedDriver::new("mem", &PagedOptions::default(), MemoryPageSink::default());
        driver.submit(&text("one")).unwrap();
        driver.submit(&Arc::new(OutputItem::PageBreak)).unwrap();
        driver.submit(&text("two")).unwrap();
        driver.finish().unwrap();

        let pages = &driver.sink().pages;
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].texts().collect::<Vec<_>>(), ["one"]);
        assert_eq!(pages[1].texts().collect::<Vec<_>>(), ["two"]);
    }

    #[test]
    fn json_pages_carry_their_size() {
        let sink = JsonPageSink::new(Vec::new(), false);
        let mut driver = PagedDriver::new("json", &PagedOptions::default(), sink);
        driver.submit(&text("hello")).unwrap();
        driver.finish().unwrap();

        let out = String::from_utf8(driver.into_sink().into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 1);
        let page: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(page["number"], 1);
        // A4 in layout units.
        assert_eq!(page["width"], 609_562);
        assert_eq!(page["elements"][0]["element"]["type"], "text");
        assert_eq!(page["elements"][0]["element"]["content"], "hello");
    }

    #[test]
    fn no_items_means_no_pages() {
        let mut driver = PagedDriver::new("mem", &PagedOptions::default(), MemoryPageSink::default());
        driver.finish().unwrap();
        assert!(driver.sink().pages.is_empty());
        assert_eq!(driver.page_count(), 0);
    }
}
