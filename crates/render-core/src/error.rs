use tabula_layout::LayoutError;
use tabula_pager::PagerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("Pagination error: {0}")]
    Pager(#[from] PagerError),
    #[error("Encoding error: {0}")]
    Encode(String),
    #[error("{driver} does not support {what}")]
    Unsupported { driver: String, what: &'static str },
    #[error("Other rendering error: {0}")]
    Other(String),
}

impl From<&str> for RenderError {
    fn from(s: &str) -> Self {
        RenderError::Other(s.to_string())
    }
}
