// src/error.rs
//! The error type for document loading and driver operations.

use tabula_pager::PagerError;
use tabula_render_core::RenderError;
use tabula_table::TableError;
use tabula_tex::LexError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Table error: {0}")]
    Table(#[from] TableError),
    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),
    #[error("Pagination error: {0}")]
    Pager(#[from] PagerError),
    #[error("TeX error: {0}")]
    Tex(#[from] LexError),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<&str> for OutputError {
    fn from(s: &str) -> Self {
        OutputError::Config(s.to_string())
    }
}
