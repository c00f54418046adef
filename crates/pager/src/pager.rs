use crate::PagerError;
use crate::heading::HeadingBlock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tabula_layout::{
    GroupItem, ItemLayout, LayoutEnvironment, Offset, OutputItem, SharedItem, Surface,
    TextMeasurer,
};
use tabula_style::{LayoutStyle, PageSetup, PageStyle, StyleOptions, unshare};
use tabula_types::Axis;

/// A bookmark for a group or an item, pointing at where its first content
/// landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    /// Nesting depth: 0 at the top level, one more inside each open group.
    pub level: usize,
    pub label: String,
    /// Page number as printed on the page.
    pub page: u32,
    /// Offset from the top of the page, in layout units.
    pub y: i32,
}

/// Places slices of items on page surfaces.
///
/// The caller owns the page loop. `add_item` places what fits on the open
/// page; then, while `needs_new_page()`, the caller calls `finish_page()`,
/// shows the page it gets back and passes a fresh surface to `add_page`,
/// which resumes placing the item.
#[derive(Debug)]
pub struct Pager<S: Surface> {
    page_style: Arc<PageStyle>,
    layout_style: Arc<LayoutStyle>,
    measurer: Arc<dyn TextMeasurer>,
    headings: [HeadingBlock; 2],
    vars: HashMap<String, String>,

    surface: Option<S>,
    item: Option<ItemLayout>,
    y: i32,
    pages: u32,
    page_has_content: bool,
    force_new_page: bool,

    groups: Vec<String>,
    pending_outline: Vec<(usize, String)>,
    item_outlined: bool,
    outline: Vec<OutlineEntry>,
}

/// Measures the headings and, when they leave room for a body, moves them
/// out of the body into the top and bottom margins.
fn fit_headings(
    page_style: &mut Arc<PageStyle>,
    layout_style: &mut Arc<LayoutStyle>,
    measurer: &Arc<dyn TextMeasurer>,
) -> [HeadingBlock; 2] {
    let env = LayoutEnvironment::new(layout_style.clone(), measurer.clone());
    let headings = [
        HeadingBlock::new(&page_style.headings[0], &env),
        HeadingBlock::new(&page_style.headings[1], &env),
    ];
    let total = headings[0].height() + headings[1].height();
    if total > 0 && total < layout_style.size[Axis::V] {
        let page = unshare(page_style);
        page.margins[Axis::V][0] += headings[0].height();
        page.margins[Axis::V][1] += headings[1].height();
        let layout = unshare(layout_style);
        layout.size[Axis::V] -= total;
        layout.min_break[Axis::V] = layout.size[Axis::V] / 2;
    } else if total > 0 {
        log::warn!("page headings of height {total} leave no room for a body; not drawing them");
        return [HeadingBlock::default(), HeadingBlock::default()];
    }
    headings
}

impl<S: Surface> Pager<S> {
    pub fn new(
        page_style: Arc<PageStyle>,
        layout_style: Arc<LayoutStyle>,
        measurer: Arc<dyn TextMeasurer>,
    ) -> Self {
        let mut page_style = page_style;
        let mut layout_style = layout_style;
        let headings = fit_headings(&mut page_style, &mut layout_style, &measurer);
        Self {
            page_style,
            layout_style,
            measurer,
            headings,
            vars: HashMap::new(),
            surface: None,
            item: None,
            y: 0,
            pages: 0,
            page_has_content: false,
            force_new_page: false,
            groups: Vec::new(),
            pending_outline: Vec::new(),
            item_outlined: false,
            outline: Vec::new(),
        }
    }

    pub fn page_style(&self) -> &Arc<PageStyle> {
        &self.page_style
    }

    pub fn layout_style(&self) -> &Arc<LayoutStyle> {
        &self.layout_style
    }

    /// Sets a variable for `&[Name]` substitution in headings.
    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn outline(&self) -> &[OutlineEntry] {
        &self.outline
    }

    /// Pages started so far.
    pub fn page_count(&self) -> u32 {
        self.pages
    }

    fn environment(&self) -> LayoutEnvironment {
        LayoutEnvironment::new(self.layout_style.clone(), self.measurer.clone())
    }

    fn page_number(&self) -> u32 {
        self.page_style.initial_page_number + self.pages.saturating_sub(1)
    }

    /// True while the current item still has something to place.
    pub fn has_item(&self) -> bool {
        self.item.as_ref().is_some_and(|item| !item.is_drained())
    }

    /// Starts laying out `item` and places as much of it as fits on the
    /// open page. State-only items take effect immediately.
    pub fn add_item(&mut self, item: SharedItem) -> Result<(), PagerError> {
        match &*item {
            OutputItem::PageSetup(setup) => {
                self.update_page_setup(setup);
                return Ok(());
            }
            OutputItem::Group(GroupItem::Open { label }) => {
                if self.page_style.include_outline {
                    self.pending_outline.push((self.groups.len(), label.clone()));
                }
                self.groups.push(label.clone());
                return Ok(());
            }
            OutputItem::Group(GroupItem::Close) => {
                if self.groups.pop().is_none() {
                    log::warn!("group close without a matching open");
                }
                self.pending_outline.retain(|(level, _)| *level < self.groups.len());
                return Ok(());
            }
            _ => {}
        }
        if self.has_item() {
            log::warn!("replacing an item that was not fully drained");
        }
        match ItemLayout::new(item, self.environment()) {
            Ok(layout) => {
                self.item = Some(layout);
                self.item_outlined = false;
            }
            Err(err) => log::warn!("skipping item: {err}"),
        }
        self.run()
    }

    pub fn has_page(&self) -> bool {
        self.surface.is_some()
    }

    /// Opens a page on `surface`, paints its headings and resumes placing
    /// the current item.
    pub fn add_page(&mut self, surface: S) -> Result<(), PagerError> {
        if self.surface.is_some() {
            log::warn!("adding a page while another is open; the open page is discarded");
        }
        let mut surface = surface;
        self.pages += 1;
        self.y = 0;
        self.page_has_content = false;
        self.force_new_page = false;

        let env = self.environment();
        let left = self.page_style.margins[Axis::H][0];
        let body_top = self.page_style.margins[Axis::V][0];
        let number = self.page_number();
        self.headings[0].paint(
            &mut surface,
            &env,
            number,
            &self.vars,
            left,
            body_top - self.headings[0].height(),
        );
        self.headings[1].paint(
            &mut surface,
            &env,
            number,
            &self.vars,
            left,
            body_top + self.layout_style.size[Axis::V],
        );
        log::debug!("started page {number}");
        self.surface = Some(surface);
        self.run()
    }

    pub fn needs_new_page(&self) -> bool {
        self.has_item()
            && (self.surface.is_none()
                || self.force_new_page
                || self.y >= self.layout_style.size[Axis::V])
    }

    /// Closes the open page and hands its surface back.
    pub fn finish_page(&mut self) -> Option<S> {
        let surface = self.surface.take()?;
        log::debug!("finished page {}", self.page_number());
        self.force_new_page = false;
        Some(surface)
    }

    /// Places slices of the current item until it is drained or the page
    /// is full. An item that cannot place anything on an empty page is
    /// dropped with an error, so the caller never loops on blank pages.
    fn run(&mut self) -> Result<(), PagerError> {
        let body = self.layout_style.size[Axis::V];
        let spacing = self.layout_style.object_spacing;
        let left = self.page_style.margins[Axis::H][0];
        let top = self.page_style.margins[Axis::V][0];
        let page = self.page_number();
        let include_outline = self.page_style.include_outline;
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        while let Some(layout) = self.item.as_mut() {
            if layout.is_drained() || self.force_new_page {
                break;
            }
            if body <= 0 {
                let kind = layout.item().kind_name();
                self.item = None;
                return Err(PagerError::NoRoom { kind, body });
            }
            if self.y >= body {
                break;
            }
            let fresh = self.y == 0;
            let mut offset = Offset::new(&mut *surface, left, top + self.y);
            let chunk = layout.draw_slice(&mut offset, body - self.y)?;
            if chunk > 0 {
                let y = top + self.y;
                for (level, label) in self.pending_outline.drain(..) {
                    self.outline.push(OutlineEntry { level, label, page, y });
                }
                if include_outline && !self.item_outlined {
                    self.outline.push(OutlineEntry {
                        level: self.groups.len(),
                        label: layout.item().label(),
                        page,
                        y,
                    });
                }
                self.item_outlined = true;
                self.y += chunk + spacing;
                self.page_has_content = true;
            } else if !layout.is_drained() {
                if fresh {
                    let kind = layout.item().kind_name();
                    self.item = None;
                    return Err(PagerError::NoRoom { kind, body });
                }
                self.y = body;
            }
        }
        Ok(())
    }

    /// Applies a new page setup. A geometry change while the current page
    /// has content sends the next item to a new page.
    pub fn update_page_setup(&mut self, setup: &PageSetup) {
        let options = StyleOptions {
            font: self.layout_style.font.to_string(),
            foreground_color: self.layout_style.fg,
            background_color: self.layout_style.bg,
            systemcolors: self.layout_style.use_system_colors,
            outline: self.page_style.include_outline,
            font_resolution: self.layout_style.font_resolution,
        };
        let (page_style, layout_style) = options.to_styles(setup);
        let mut page_style = Arc::new(page_style);
        let mut layout_style = Arc::new(layout_style);
        let headings = fit_headings(&mut page_style, &mut layout_style, &self.measurer);

        let changed = *page_style != *self.page_style || *layout_style != *self.layout_style;
        if changed && self.surface.is_some() && self.page_has_content {
            log::debug!("page setup changed mid-page; breaking");
            self.force_new_page = true;
        }
        self.page_style = page_style;
        self.layout_style = layout_style;
        self.headings = headings;
    }

    /// Drains `items` onto surfaces from `new_surface`, one page at a time.
    pub fn pages<I, F>(self, items: I, new_surface: F) -> crate::PageIterator<S, I::IntoIter, F>
    where
        I: IntoIterator<Item = SharedItem>,
        F: FnMut(u32) -> Result<S, PagerError>,
    {
        crate::PageIterator::new(self, items.into_iter(), new_surface)
    }
}
