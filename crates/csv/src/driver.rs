use crate::field::CsvField;
use crate::options::CsvOptions;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tabula_layout::{OutputItem, SharedItem, TableItem, TextKind};
use tabula_render_core::{OutputDriver, RenderError};
use tabula_style::HAlign;
use tabula_table::{TableProvider, TextTable};
use tabula_types::Axis;

/// Writes items as delimited text, separating items with a blank line.
#[derive(Debug)]
pub struct CsvDriver<W: Write> {
    name: String,
    out: W,
    options: CsvOptions,
    /// Items written so far.
    n_items: usize,
}

impl CsvDriver<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>, options: CsvOptions) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        Ok(Self::new(path.display().to_string(), BufWriter::new(file), options))
    }
}

impl<W: Write> CsvDriver<W> {
    pub fn new(name: impl Into<String>, out: W, options: CsvOptions) -> Self {
        Self {
            name: name.into(),
            out,
            options,
            n_items: 0,
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn start_item(&mut self) -> Result<(), RenderError> {
        if self.n_items > 0 {
            writeln!(self.out)?;
        }
        self.n_items += 1;
        Ok(())
    }

    fn write_field(&mut self, text: &str) -> Result<(), RenderError> {
        write!(self.out, "{}", CsvField::new(text, &self.options))?;
        Ok(())
    }

    /// Writes each line of `text` as a one-field row.
    fn write_lines(&mut self, text: &str) -> Result<(), RenderError> {
        for line in text.lines() {
            self.write_field(line)?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    /// Writes every row of `table`. Only a span's top-left cell has
    /// content; the rest of the span is empty fields. `leader` prefixes the
    /// first field.
    fn write_table(&mut self, table: &dyn TableProvider, leader: Option<&str>) -> Result<(), RenderError> {
        for y in 0..table.n(Axis::V) {
            for x in 0..table.n(Axis::H) {
                if x > 0 {
                    self.out.write_all(self.options.separator.as_bytes())?;
                }
                let cell = table.get_cell(x, y);
                if !cell.is_top_left(x, y) {
                    continue;
                }
                let text = cell.display_text();
                match leader {
                    Some(leader) if x == 0 && y == 0 => self.write_field(&format!("{leader}: {text}"))?,
                    _ => self.write_field(&text)?,
                }
            }
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn write_table_item(&mut self, item: &TableItem) -> Result<(), RenderError> {
        self.start_item()?;
        if self.options.titles
            && let Some(title) = &item.title
        {
            self.write_table(&TextTable::single(title.as_str(), HAlign::Center), Some("Table"))?;
        }
        self.write_table(item.table.as_ref(), None)?;
        if self.options.captions
            && let Some(caption) = &item.caption
        {
            self.write_table(&TextTable::single(caption.as_str(), HAlign::Left), Some("Caption"))?;
        }
        let footnotes = item.table.footnotes();
        if !footnotes.is_empty() {
            self.write_table(&TextTable::from_footnotes(&footnotes), Some("Footnote"))?;
        }
        Ok(())
    }
}

impl<W: Write> OutputDriver for CsvDriver<W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn submit(&mut self, item: &SharedItem) -> Result<(), RenderError> {
        match &**item {
            OutputItem::Table(table) => self.write_table_item(table)?,
            OutputItem::Text(text) => match text.kind {
                TextKind::Syntax | TextKind::PageTitle => {}
                TextKind::Title | TextKind::Log => {
                    self.start_item()?;
                    self.write_lines(&text.text)?;
                }
            },
            OutputItem::Message(message) => {
                self.start_item()?;
                self.write_field(&message.to_string())?;
                writeln!(self.out)?;
            }
            OutputItem::PageBreak => {
                self.start_item()?;
                writeln!(self.out)?;
            }
            OutputItem::PageSetup(_) | OutputItem::Group(_) => {}
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), RenderError> {
        self.out.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        log::debug!("{}: wrote {} items", self.name, self.n_items);
        self.flush()
    }
}
