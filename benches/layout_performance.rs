//! Layout and pagination micro-benchmarks
//!
//! Measures how long it takes to measure and paginate tables of growing size.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;
use tabula::layout::{OutputItem, SharedItem, TableItem};
use tabula::render::OutputDriver;
use tabula::table::{CellOptions, RuleCode, Stroke, Table};
use tabula::{MemoryPageSink, PagedDriver, PagedOptions};

/// A boxed table with one header row, one label column and `rows` data rows.
fn numeric_table(rows: usize, columns: usize) -> SharedItem {
    let mut table = Table::new(columns + 1, rows + 1);
    table
        .set_headers(1, 0, 1, 0)
        .expect("headers fit the table");
    for x in 0..columns {
        table
            .set_text_formatted(x + 1, 0, CellOptions::CENTER, format_args!("Var{x}"))
            .expect("cell in bounds");
    }
    for y in 0..rows {
        table
            .set_text_formatted(0, y + 1, CellOptions::LEFT, format_args!("Case {y}"))
            .expect("cell in bounds");
        for x in 0..columns {
            let value = (y * 31 + x * 17) as f64 / 7.0;
            table
                .set_text_formatted(x + 1, y + 1, CellOptions::empty(), format_args!("{value:.2}"))
                .expect("cell in bounds");
        }
    }
    let solid = Some(RuleCode::new(Stroke::Solid, 0));
    let thin = Some(RuleCode::new(Stroke::Thin, 0));
    table
        .draw_box(solid, solid, thin, thin, 0, 0, columns, rows)
        .expect("box in bounds");
    Arc::new(OutputItem::Table(
        TableItem::new(Box::new(table)).with_title("Descriptive statistics"),
    ))
}

fn paginate(item: &SharedItem) -> usize {
    let mut driver = PagedDriver::new("bench", &PagedOptions::default(), MemoryPageSink::default());
    driver.submit(item).expect("layout succeeds");
    driver.finish().expect("layout succeeds");
    driver.into_sink().pages.len()
}

fn benchmark_paginate_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("paginate_tables");

    for row_count in [10, 100, 500] {
        let item = numeric_table(row_count, 6);
        group.bench_with_input(BenchmarkId::new("rows", row_count), &item, |b, item| {
            b.iter(|| black_box(paginate(item)));
        });
    }

    group.finish();
}

fn benchmark_wide_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("wide_tables");

    for column_count in [4, 16, 40] {
        let item = numeric_table(50, column_count);
        group.bench_with_input(
            BenchmarkId::new("columns", column_count),
            &item,
            |b, item| {
                b.iter(|| black_box(paginate(item)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_paginate_tables, benchmark_wide_tables);
criterion_main!(benches);
