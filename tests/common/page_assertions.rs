use tabula::layout::{LayoutElement, RecordingSurface};

/// Texts drawn on each page.
pub fn page_texts(pages: &[RecordingSurface]) -> Vec<Vec<String>> {
    pages
        .iter()
        .map(|page| page.texts().map(str::to_string).collect())
        .collect()
}

/// Lowest edge of anything drawn on the page.
pub fn content_bottom(page: &RecordingSurface) -> i32 {
    page.elements
        .iter()
        .map(|e| e.y + e.height)
        .max()
        .unwrap_or(0)
}

pub fn count_rules(page: &RecordingSurface) -> usize {
    page.elements
        .iter()
        .filter(|e| matches!(e.element, LayoutElement::Rule(_)))
        .count()
}
