//! Tokenizing small TeX fragments, as found in chart labels, and turning
//! them into plain Unicode text.

pub mod glyphs;
pub mod lexer;

pub use glyphs::{escape, glyph, transliterate};
pub use lexer::{Category, Lexer, Token, tokenize};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("escape character at end of input")]
    TrailingEscape,
}
