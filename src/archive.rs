//! An [`ArchiveWriter`] that records each call as one JSON line.

use serde::Serialize;
use serde_json::json;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tabula_layout::{TableItem, TextItem, TextKind};
use tabula_render_core::{ArchiveWriter, RenderError};
use tabula_style::PageSetup;
use tabula_table::TableProvider;
use tabula_types::Axis;

#[derive(Debug)]
pub struct JsonArchiveWriter<W: Write> {
    out: W,
    images: usize,
}

impl JsonArchiveWriter<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        Ok(Self::new(BufWriter::new(File::create(path.as_ref())?)))
    }
}

impl<W: Write> JsonArchiveWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, images: 0 }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn record<T: Serialize>(&mut self, record: &T) -> Result<(), RenderError> {
        serde_json::to_writer(&mut self.out, record).map_err(|e| RenderError::Encode(e.to_string()))?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

/// Cell texts row by row; cells covered by another cell's span are empty.
fn table_rows(table: &dyn TableProvider) -> Vec<Vec<String>> {
    let (nc, nr) = (table.n(Axis::H), table.n(Axis::V));
    (0..nr)
        .map(|y| {
            (0..nc)
                .map(|x| {
                    let cell = table.get_cell(x, y);
                    if cell.is_top_left(x, y) {
                        cell.display_text()
                    } else {
                        String::new()
                    }
                })
                .collect()
        })
        .collect()
}

fn kind_label(kind: TextKind) -> &'static str {
    match kind {
        TextKind::Title => "title",
        TextKind::Log => "log",
        TextKind::Syntax => "syntax",
        TextKind::PageTitle => "page_title",
    }
}

impl<W: Write> ArchiveWriter for JsonArchiveWriter<W> {
    fn open(&mut self) -> Result<(), RenderError> {
        self.record(&json!({ "op": "open" }))
    }

    fn close(&mut self) -> Result<(), RenderError> {
        self.record(&json!({ "op": "close", "images": self.images }))?;
        self.out.flush()?;
        Ok(())
    }

    fn put_table(&mut self, item: &TableItem) -> Result<(), RenderError> {
        let footnotes: Vec<_> = item
            .table
            .footnotes()
            .iter()
            .map(|f| json!({ "marker": f.marker, "content": f.content }))
            .collect();
        self.record(&json!({
            "op": "table",
            "title": item.title,
            "caption": item.caption,
            "headers": {
                "columns": item.table.headers(Axis::H),
                "rows": item.table.headers(Axis::V),
            },
            "rows": table_rows(item.table.as_ref()),
            "footnotes": footnotes,
        }))
    }

    fn put_text(&mut self, text: &TextItem) -> Result<(), RenderError> {
        self.record(&json!({ "op": "text", "kind": kind_label(text.kind), "text": text.text }))
    }

    fn put_image(&mut self, name: &str, data: &[u8]) -> Result<(), RenderError> {
        self.images += 1;
        self.record(&json!({ "op": "image", "name": name, "bytes": data.len() }))
    }

    fn open_heading(&mut self, label: &str) -> Result<(), RenderError> {
        self.record(&json!({ "op": "open_heading", "label": label }))
    }

    fn close_heading(&mut self) -> Result<(), RenderError> {
        self.record(&json!({ "op": "close_heading" }))
    }

    fn eject_page(&mut self) -> Result<(), RenderError> {
        self.record(&json!({ "op": "eject_page" }))
    }

    fn set_page_setup(&mut self, setup: &PageSetup) -> Result<(), RenderError> {
        self.record(&json!({ "op": "page_setup", "setup": setup }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::sync::Arc;
    use tabula_layout::{GroupItem, OutputItem, SharedItem};
    use tabula_render_core::{ArchiveDriver, OutputDriver};
    use tabula_table::{CellOptions, Table};

    fn records(bytes: Vec<u8>) -> Vec<Value> {
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn items_become_records() {
        let mut table = Table::new(2, 1);
        table.join(0, 0, 1, 0, CellOptions::empty(), "wide").unwrap();
        let items: Vec<SharedItem> = vec![
            Arc::new(OutputItem::Group(GroupItem::Open { label: "Section".into() })),
            Arc::new(OutputItem::Table(TableItem::new(Box::new(table)).with_title("T"))),
            Arc::new(OutputItem::PageBreak),
        ];
        let mut driver = ArchiveDriver::new("archive", JsonArchiveWriter::new(Vec::new()));
        for item in &items {
            driver.submit(item).unwrap();
        }
        driver.finish().unwrap();

        let ops = records(driver.into_writer().into_inner());
        let names: Vec<&str> = ops.iter().map(|r| r["op"].as_str().unwrap()).collect();
        assert_eq!(
            names,
            ["open", "open_heading", "table", "eject_page", "close_heading", "close"]
        );
        assert_eq!(ops[2]["title"], "T");
        assert_eq!(ops[2]["rows"], json!([["wide", ""]]));
    }

    #[test]
    fn images_are_counted() {
        let mut writer = JsonArchiveWriter::new(Vec::new());
        writer.open().unwrap();
        writer.put_image("chart.png", &[1, 2, 3]).unwrap();
        writer.close().unwrap();
        let ops = records(writer.into_inner());
        assert_eq!(ops[1]["bytes"], 3);
        assert_eq!(ops[2]["images"], 1);
    }
}
