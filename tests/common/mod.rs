pub mod fixtures;
pub mod page_assertions;

use std::sync::Arc;
use tabula::layout::{FixedPitchMeasurer, LayoutEnvironment, SharedItem};
use tabula::style::LayoutStyle;
use tabula::types::PerAxis;
use tabula::{Document, MemoryPageSink, OutputError, PagedDriver, PagedOptions};
use tabula::render::OutputDriver;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Builds the items of a JSON document.
pub fn items_from_json(json: &serde_json::Value) -> Result<Vec<SharedItem>, OutputError> {
    let document: Document = serde_json::from_value(json.clone())?;
    document.to_items()
}

/// Runs `items` through a paged driver that keeps its pages in memory.
pub fn paginate(items: &[SharedItem], options: &PagedOptions) -> Result<MemoryPageSink, OutputError> {
    let mut driver = PagedDriver::new("memory", options, MemoryPageSink::default());
    for item in items {
        driver.submit(item)?;
    }
    driver.finish()?;
    Ok(driver.into_sink())
}

/// A layout environment with a body of `width` by `height` units.
pub fn env_with_body(width: i32, height: i32) -> LayoutEnvironment {
    let style = LayoutStyle {
        size: PerAxis::new(width, height),
        min_break: PerAxis::new(width / 2, height / 2),
        ..LayoutStyle::default()
    };
    LayoutEnvironment::new(Arc::new(style), Arc::new(FixedPitchMeasurer::default()))
}
