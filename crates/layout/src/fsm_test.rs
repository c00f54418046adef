use crate::elements::{LayoutElement, RecordingSurface};
use crate::fsm::{ItemLayout, LayoutState};
use crate::item::{GroupItem, Message, OutputItem, Severity, TableItem, TextKind};
use crate::test_utils::{CELL_MARGIN_V, LINE, env_with_body, init_logger, numbered_table};
use crate::LayoutError;
use std::sync::Arc;
use tabula_table::{CellOptions, Table};
use tabula_types::Rect;

const ROW: i32 = LINE + CELL_MARGIN_V;

/// Drains `layout` with a fresh body of `body` per slice and returns the
/// slice heights with what each slice drew.
fn drain(layout: &mut ItemLayout, body: i32) -> Vec<(i32, RecordingSurface)> {
    let mut slices = Vec::new();
    for _ in 0..100 {
        if layout.is_drained() {
            return slices;
        }
        let mut surface = RecordingSurface::new();
        let height = layout.draw_slice(&mut surface, body).unwrap();
        if height > 0 {
            slices.push((height, surface));
        }
    }
    panic!("layout made no progress");
}

#[test]
fn test_slices_conserve_natural_height() {
    init_logger();
    let body = 3 * ROW + ROW / 2;
    let env = env_with_body(600_000, body);
    let item = Arc::new(OutputItem::table(numbered_table(1, 10, false)));
    let mut layout = ItemLayout::new(item, env).unwrap();
    let natural = layout.measure().height;
    assert_eq!(natural, 10 * ROW);

    let slices = drain(&mut layout, body);
    let heights: Vec<_> = slices.iter().map(|(h, _)| *h).collect();
    assert_eq!(heights, [3 * ROW, 3 * ROW, 3 * ROW, ROW]);
    assert_eq!(heights.iter().sum::<i32>(), natural);
    assert_eq!(slices[1].1.texts().next(), Some("r3c0"));
}

#[test]
fn test_header_rows_repeat_on_every_slice() {
    let mut table = numbered_table(1, 7, false);
    table.set_text(0, 0, CellOptions::empty(), "Header").unwrap();
    table.set_headers(0, 0, 1, 0).unwrap();
    let env = env_with_body(600_000, 3 * ROW);
    let mut layout = ItemLayout::new(Arc::new(OutputItem::table(table)), env).unwrap();

    let slices = drain(&mut layout, 3 * ROW);
    assert_eq!(slices.len(), 3);
    for (height, surface) in &slices {
        assert_eq!(surface.texts().next(), Some("Header"));
        assert_eq!(*height, 3 * ROW);
    }
    assert!(slices.iter().map(|(h, _)| h).sum::<i32>() > layout.measure().height);
}

#[test]
fn test_band_that_does_not_fit_asks_for_a_new_page() {
    let env = env_with_body(600_000, 10 * ROW);
    let mut layout = ItemLayout::new(Arc::new(OutputItem::table(numbered_table(2, 2, true))), env).unwrap();
    let mut surface = RecordingSurface::new();
    assert_eq!(layout.draw_slice(&mut surface, ROW / 2).unwrap(), 0);
    assert!(matches!(layout.state(), LayoutState::Draining(_)));
    assert!(surface.elements.is_empty());

    let height = layout.draw_slice(&mut surface, 10 * ROW).unwrap();
    assert_eq!(height, layout.measure().height);
    assert!(layout.is_drained());
    assert_eq!(
        layout.draw_slice(&mut surface, 10 * ROW),
        Err(LayoutError::Drained("table"))
    );
}

#[test]
fn test_oversized_row_is_split_into_clipped_pieces() {
    let mut table = Table::new(1, 1);
    let text = vec!["line"; 20].join("\n");
    table.set_text(0, 0, CellOptions::empty(), &text).unwrap();
    let body = 5 * LINE;
    let env = env_with_body(600_000, body);
    let mut layout = ItemLayout::new(Arc::new(OutputItem::table(table)), env).unwrap();
    let natural = layout.measure().height;
    assert_eq!(natural, 20 * LINE + CELL_MARGIN_V);

    // Less than the minimum break leaves the row for the next page.
    let mut surface = RecordingSurface::new();
    assert_eq!(layout.draw_slice(&mut surface, body / 4).unwrap(), 0);

    let slices = drain(&mut layout, body);
    assert_eq!(slices.iter().map(|(h, _)| *h).sum::<i32>(), natural);
    assert!(slices.iter().all(|(h, _)| *h <= body));
    for (height, surface) in &slices {
        for element in &surface.elements {
            let rect = element.clip.unwrap_or(element.rect());
            assert!(rect.y >= 0 && rect.bottom() <= *height);
        }
    }
}

#[test]
fn test_page_break_drains_only_on_a_fresh_body() {
    let env = env_with_body(600_000, 100_000);
    let mut layout = ItemLayout::new(Arc::new(OutputItem::PageBreak), env).unwrap();
    let mut surface = RecordingSurface::new();
    assert!(!layout.is_empty());
    assert_eq!(layout.draw_slice(&mut surface, 50_000).unwrap(), 0);
    assert!(!layout.is_drained());
    assert_eq!(layout.draw_slice(&mut surface, 100_000).unwrap(), 0);
    assert!(layout.is_drained());
}

#[test]
fn test_state_only_items_have_no_layout() {
    let env = env_with_body(600_000, 100_000);
    let group = Arc::new(OutputItem::Group(GroupItem::Open {
        label: "Descriptives".into(),
    }));
    assert_eq!(
        ItemLayout::new(group, env.clone()).unwrap_err(),
        LayoutError::NoLayout("group")
    );
    let setup = Arc::new(OutputItem::PageSetup(Default::default()));
    assert!(ItemLayout::new(setup, env).is_err());
}

#[test]
fn test_text_items_wrap_to_the_body() {
    let env = env_with_body(10 * 6 * 1024, 100_000);
    let item = Arc::new(OutputItem::text(TextKind::Log, "alpha beta gamma"));
    let mut layout = ItemLayout::new(item, env.clone()).unwrap();
    assert_eq!(layout.measure().height, 2 * LINE);

    let mut surface = RecordingSurface::new();
    layout.draw_all(&mut surface);
    assert_eq!(surface.texts().collect::<Vec<_>>(), ["alpha beta", "gamma"]);
    assert_eq!(layout.state(), LayoutState::Measured);

    let mut empty = ItemLayout::new(Arc::new(OutputItem::text(TextKind::Log, "")), env).unwrap();
    assert!(empty.is_empty());

    let message = OutputItem::Message(Message {
        severity: Severity::Warning,
        text: "odd".into(),
    });
    let mut layout = ItemLayout::new(Arc::new(message), env_with_body(600_000, 100_000)).unwrap();
    let mut surface = RecordingSurface::new();
    layout.draw_all(&mut surface);
    assert_eq!(surface.texts().next(), Some("warning: odd"));
}

#[test]
fn test_table_item_stacks_title_body_caption_and_footnotes() {
    let mut table = Table::new(1, 1);
    table.set_text(0, 0, CellOptions::empty(), "value").unwrap();
    let note = table.create_footnote("First note", "a", None);
    table.attach_footnote(0, 0, note).unwrap();
    let item = TableItem::new(Box::new(table))
        .with_title("Title")
        .with_caption("Caption");
    let env = env_with_body(600_000, 100 * ROW);
    let mut layout = ItemLayout::new(Arc::new(OutputItem::Table(item)), env).unwrap();

    let mut surface = RecordingSurface::new();
    layout.draw_all(&mut surface);
    let texts: Vec<_> = surface.texts().collect();
    assert_eq!(texts, ["Title", "value[a]", "Caption", "a", "First note"]);
    assert_eq!(layout.measure().height, 4 * ROW);

    let ys: Vec<_> = surface
        .elements
        .iter()
        .filter(|e| matches!(e.element, LayoutElement::Text(_)))
        .map(|e| e.y)
        .collect();
    assert!(ys.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_draw_region_keeps_intersecting_elements() {
    let env = env_with_body(600_000, 100 * ROW);
    let mut layout = ItemLayout::new(Arc::new(OutputItem::table(numbered_table(1, 4, false))), env).unwrap();
    let mut surface = RecordingSurface::new();
    layout.draw_region(&mut surface, Rect::new(0, ROW, 600_000, ROW));
    assert_eq!(surface.texts().collect::<Vec<_>>(), ["r1c0"]);
    assert_eq!(layout.state(), LayoutState::Measured);
}
