use serde_json::{Value, json};

/// A 3x2 table boxed with solid rules whose first column is one cell
/// spanning both rows.
pub fn boxed_table_with_joined_column() -> Value {
    json!({
        "type": "table",
        "columns": 3,
        "rows": 2,
        "cells": [
            { "x": 1, "y": 0, "text": "b", "halign": "left" },
            { "x": 2, "y": 0, "text": "c", "halign": "left" },
            { "x": 1, "y": 1, "text": "e", "halign": "left" },
            { "x": 2, "y": 1, "text": "f", "halign": "left" }
        ],
        "joins": [{ "x1": 0, "y1": 0, "x2": 0, "y2": 1, "text": "Both" }],
        "boxes": [{ "x1": 0, "y1": 0, "x2": 2, "y2": 1, "outer": "solid" }]
    })
}

/// A table of `rows` data rows under one header row.
pub fn long_table(rows: usize) -> Value {
    let mut data = vec![vec!["Header".to_string(), "Value".to_string()]];
    for i in 0..rows {
        data.push(vec![format!("row {i}"), format!("{}", i * 7)]);
    }
    json!({
        "type": "table",
        "title": "Long table",
        "headers": { "top": 1 },
        "data": data,
        "boxes": [{ "x1": 0, "y1": 0, "x2": 1, "y2": rows, "outer": "solid", "inner": "thin" }]
    })
}

pub fn text(kind: &str, text: &str) -> Value {
    json!({ "type": "text", "kind": kind, "text": text })
}

pub fn document(items: Vec<Value>) -> Value {
    json!({ "items": items })
}
