use crate::PagerError;
use crate::pager::Pager;
use tabula_layout::{SharedItem, Surface};

/// Pulls items through a [`Pager`] and yields each page as it fills up.
///
/// `new_surface` receives the 1-based index of the page it creates. After
/// an error the iterator is fused.
pub struct PageIterator<S, I, F>
where
    S: Surface,
{
    pager: Pager<S>,
    items: I,
    new_surface: F,
    done: bool,
}

impl<S, I, F> PageIterator<S, I, F>
where
    S: Surface,
    I: Iterator<Item = SharedItem>,
    F: FnMut(u32) -> Result<S, PagerError>,
{
    pub fn new(pager: Pager<S>, items: I, new_surface: F) -> Self {
        Self {
            pager,
            items,
            new_surface,
            done: false,
        }
    }

    pub fn pager(&self) -> &Pager<S> {
        &self.pager
    }

    pub fn into_pager(self) -> Pager<S> {
        self.pager
    }

    pub fn next_page(&mut self) -> Option<Result<S, PagerError>> {
        if self.done {
            return None;
        }
        loop {
            if self.pager.needs_new_page() {
                if let Some(page) = self.pager.finish_page() {
                    return Some(Ok(page));
                }
                let added = (self.new_surface)(self.pager.page_count() + 1)
                    .and_then(|surface| self.pager.add_page(surface));
                if let Err(err) = added {
                    return Some(self.fail(err));
                }
                continue;
            }
            match self.items.next() {
                Some(item) => {
                    if let Err(err) = self.pager.add_item(item) {
                        return Some(self.fail(err));
                    }
                }
                None => {
                    self.done = true;
                    return self.pager.finish_page().map(Ok);
                }
            }
        }
    }

    fn fail(&mut self, err: PagerError) -> Result<S, PagerError> {
        log::error!("pagination stopped: {err}");
        self.done = true;
        Err(err)
    }
}

impl<S, I, F> Iterator for PageIterator<S, I, F>
where
    S: Surface,
    I: Iterator<Item = SharedItem>,
    F: FnMut(u32) -> Result<S, PagerError>,
{
    type Item = Result<S, PagerError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_page()
    }
}
