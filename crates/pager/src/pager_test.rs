use crate::{OutlineEntry, Pager, PagerError};
use std::sync::Arc;
use tabula_layout::{
    FixedPitchMeasurer, GroupItem, OutputItem, RecordingSurface, SharedItem, TextKind,
};
use tabula_style::{
    HAlign, LayoutStyle, Orientation, PageHeading, PageParagraph, PageSetup, PageStyle,
    StyleOptions,
};
use tabula_table::{CellOptions, Table};
use tabula_types::Axis;

const LINE: i32 = 12 * 1024;
const ROW: i32 = LINE + 2 * 72 * 1024 / 96;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn styles(options: &StyleOptions, setup: &PageSetup) -> (Arc<PageStyle>, Arc<LayoutStyle>) {
    let (page, layout) = options.to_styles(setup);
    (Arc::new(page), Arc::new(layout))
}

fn pager_with_body(height: i32) -> Pager<RecordingSurface> {
    let (page, mut layout) = StyleOptions::default().to_styles(&PageSetup::default());
    layout.size[Axis::V] = height;
    layout.min_break[Axis::V] = height / 2;
    Pager::new(
        Arc::new(page),
        Arc::new(layout),
        Arc::new(FixedPitchMeasurer::default()),
    )
}

fn default_pager() -> Pager<RecordingSurface> {
    let (page, layout) = styles(&StyleOptions::default(), &PageSetup::default());
    Pager::new(page, layout, Arc::new(FixedPitchMeasurer::default()))
}

fn text(s: &str) -> SharedItem {
    Arc::new(OutputItem::text(TextKind::Log, s))
}

fn column_table(rows: usize) -> SharedItem {
    let mut table = Table::new(1, rows);
    for y in 0..rows {
        table
            .set_text_formatted(0, y, CellOptions::empty(), format_args!("row {y}"))
            .unwrap();
    }
    Arc::new(OutputItem::table(table))
}

fn paginate(pager: Pager<RecordingSurface>, items: Vec<SharedItem>) -> Vec<RecordingSurface> {
    pager
        .pages(items, |_| Ok(RecordingSurface::new()))
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn texts(page: &RecordingSurface) -> Vec<&str> {
    page.texts().collect()
}

#[test]
fn test_long_table_spans_pages() {
    init_logger();
    let pages = paginate(pager_with_body(4 * ROW + ROW / 2), vec![column_table(10)]);
    assert_eq!(pages.len(), 3);
    assert_eq!(texts(&pages[0]).len(), 4);
    assert_eq!(texts(&pages[1])[0], "row 4");
    assert_eq!(texts(&pages[2]), ["row 8", "row 9"]);
}

#[test]
fn test_page_break_starts_a_new_page() {
    let items = vec![text("one"), Arc::new(OutputItem::PageBreak), text("two")];
    let pages = paginate(default_pager(), items);
    assert_eq!(pages.len(), 2);
    assert_eq!(texts(&pages[0]), ["one"]);
    assert_eq!(texts(&pages[1]), ["two"]);
}

#[test]
fn test_items_are_separated_by_object_spacing() {
    let pager = default_pager();
    let spacing = pager.layout_style().object_spacing;
    let pages = paginate(pager, vec![text("one"), text("two")]);
    assert_eq!(pages.len(), 1);
    let ys: Vec<_> = pages[0].elements.iter().map(|e| e.y).collect();
    assert_eq!(ys[1] - ys[0], LINE + spacing);
}

#[test]
fn test_headings_move_into_the_margins() {
    let setup = PageSetup {
        headings: [
            PageHeading {
                paragraphs: vec![PageParagraph::new("Page &[Page]", HAlign::Center)],
            },
            PageHeading::default(),
        ],
        ..PageSetup::default()
    };
    let (page, layout) = styles(&StyleOptions::default(), &setup);
    let pager = Pager::<RecordingSurface>::new(
        page.clone(),
        layout.clone(),
        Arc::new(FixedPitchMeasurer::default()),
    );
    assert_eq!(pager.layout_style().size[Axis::V], layout.size[Axis::V] - LINE);
    assert_eq!(pager.page_style().margins[Axis::V][0], page.margins[Axis::V][0] + LINE);
    // The caller's styles are untouched.
    assert_eq!(page.margins[Axis::V][0], setup.margin_units()[Axis::V][0]);

    let items = vec![text("one"), Arc::new(OutputItem::PageBreak), text("two")];
    let pages = paginate(pager, items);
    assert_eq!(texts(&pages[0]), ["Page 1", "one"]);
    assert_eq!(texts(&pages[1]), ["Page 2", "two"]);
    let heading = &pages[0].elements[0];
    assert_eq!(heading.y, page.margins[Axis::V][0]);
}

#[test]
fn test_page_setup_change_breaks_the_page() {
    let landscape = PageSetup {
        orientation: Orientation::Landscape,
        ..PageSetup::default()
    };
    let items = vec![
        text("one"),
        Arc::new(OutputItem::PageSetup(landscape)),
        text("two"),
    ];
    let pages = paginate(default_pager(), items);
    assert_eq!(pages.len(), 2);

    let items = vec![
        text("one"),
        Arc::new(OutputItem::PageSetup(PageSetup::default())),
        text("two"),
    ];
    let pages = paginate(default_pager(), items);
    assert_eq!(pages.len(), 1);
}

#[test]
fn test_outline_records_groups_and_items() {
    let options = StyleOptions {
        outline: true,
        ..StyleOptions::default()
    };
    let (page, layout) = styles(&options, &PageSetup::default());
    let top = page.margins[Axis::V][0];
    let spacing = layout.object_spacing;
    let mut pager = Pager::new(page, layout, Arc::new(FixedPitchMeasurer::default()));
    pager
        .add_item(Arc::new(OutputItem::Group(GroupItem::Open {
            label: "Frequencies".into(),
        })))
        .unwrap();
    pager.add_item(text("counted")).unwrap();
    assert!(pager.needs_new_page());
    assert!(pager.finish_page().is_none());
    pager.add_page(RecordingSurface::new()).unwrap();
    assert!(!pager.has_item());
    pager.add_item(Arc::new(OutputItem::text(TextKind::Title, "Summary"))).unwrap();
    pager.add_item(Arc::new(OutputItem::Group(GroupItem::Close))).unwrap();
    pager.add_item(text("after")).unwrap();

    let entry = |level, label: &str, y| OutlineEntry {
        level,
        label: label.into(),
        page: 1,
        y,
    };
    assert_eq!(
        pager.outline(),
        [
            entry(0, "Frequencies", top),
            entry(1, "Log", top),
            entry(1, "Title", top + LINE + spacing),
            entry(0, "Log", top + 2 * (LINE + spacing)),
        ]
    );
    let page = pager.finish_page().unwrap();
    assert_eq!(texts(&page), ["counted", "Summary", "after"]);
    assert!(pager.finish_page().is_none());
}

#[test]
fn test_caller_loop_drains_items() {
    init_logger();
    let mut pager = pager_with_body(4 * ROW + ROW / 2);
    let mut shown = Vec::new();
    for item in [text("hello"), column_table(10)] {
        pager.add_item(item).unwrap();
        while pager.needs_new_page() {
            if let Some(page) = pager.finish_page() {
                shown.push(page);
            }
            pager.add_page(RecordingSurface::new()).unwrap();
        }
        assert!(!pager.has_item());
    }
    shown.extend(pager.finish_page());

    assert_eq!(texts(&shown[0])[0], "hello");
    let rows: usize = shown
        .iter()
        .map(|page| texts(page).iter().filter(|t| t.starts_with("row ")).count())
        .sum();
    assert_eq!(rows, 10);
    assert_eq!(pager.page_count() as usize, shown.len());
}

#[test]
fn test_item_that_never_fits_stops_pagination() {
    init_logger();
    let mut pages = pager_with_body(0).pages(vec![text("x"), text("y")], |_| Ok(RecordingSurface::new()));
    let mut results = Vec::new();
    for result in pages.by_ref().take(10) {
        results.push(result.map(|page| page.elements.len()));
    }
    assert_eq!(
        results,
        [Err(PagerError::NoRoom {
            kind: "text",
            body: 0
        })]
    );
    assert!(pages.next().is_none());
}

#[test]
fn test_margins_wider_than_the_paper_still_paginate() {
    init_logger();
    let setup = PageSetup {
        margins: tabula_style::Margins::all(6.0),
        ..PageSetup::default()
    };
    let (page, layout) = styles(&StyleOptions::default(), &setup);
    let pager = Pager::new(page, layout, Arc::new(FixedPitchMeasurer::default()));
    let pages = paginate(pager, vec![text("x")]);
    assert_eq!(pages.len(), 1);
    assert_eq!(texts(&pages[0]), ["x"]);
}

#[test]
fn test_surface_failure_stops_iteration() {
    let mut pages = default_pager().pages(vec![text("one")], |_| {
        Err::<RecordingSurface, _>(PagerError::Surface("no space left".into()))
    });
    assert_eq!(
        pages.next().map(|r| r.map(|_| ())),
        Some(Err(PagerError::Surface("no space left".into())))
    );
    assert!(pages.next().is_none());
}
