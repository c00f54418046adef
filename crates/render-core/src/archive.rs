use crate::error::RenderError;
use crate::traits::{ArchiveWriter, OutputDriver};
use tabula_layout::{GroupItem, OutputItem, SharedItem};

/// Feeds items to an [`ArchiveWriter`], opening it on the first item and
/// closing any headings left open at the end.
#[derive(Debug)]
pub struct ArchiveDriver<W: ArchiveWriter> {
    name: String,
    writer: W,
    opened: bool,
    depth: usize,
}

impl<W: ArchiveWriter> ArchiveDriver<W> {
    pub fn new(name: impl Into<String>, writer: W) -> Self {
        Self {
            name: name.into(),
            writer,
            opened: false,
            depth: 0,
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn ensure_open(&mut self) -> Result<(), RenderError> {
        if !self.opened {
            self.writer.open()?;
            self.opened = true;
        }
        Ok(())
    }
}

impl<W: ArchiveWriter> OutputDriver for ArchiveDriver<W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn submit(&mut self, item: &SharedItem) -> Result<(), RenderError> {
        self.ensure_open()?;
        match &**item {
            OutputItem::Group(GroupItem::Open { .. }) => self.depth += 1,
            OutputItem::Group(GroupItem::Close) => {
                if self.depth == 0 {
                    log::warn!("{}: ignoring unbalanced group close", self.name);
                    return Ok(());
                }
                self.depth -= 1;
            }
            _ => {}
        }
        self.writer.write(item)
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        if !self.opened {
            return Ok(());
        }
        while self.depth > 0 {
            self.writer.close_heading()?;
            self.depth -= 1;
        }
        self.opened = false;
        self.writer.close()
    }
}
