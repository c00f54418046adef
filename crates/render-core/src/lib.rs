//! Core abstractions for output backends.
//!
//! This crate provides the traits every backend implements:
//! - `OutputDriver`, the per-item sink the output engine feeds
//! - `ArchiveWriter`, the primitive calls of a structured archive backend,
//!   with `ArchiveDriver` mapping items onto them
//! - `RenderError` for backend failures

mod archive;
mod error;
mod traits;

pub use archive::ArchiveDriver;
pub use error::RenderError;
pub use traits::{ArchiveWriter, OutputDriver};
