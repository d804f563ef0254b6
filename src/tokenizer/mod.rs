// nmlio/src/tokenizer/mod.rs

//! Lexical analysis for Fortran namelist text.
//!
//! The tokenizer works one line at a time, carrying the pending string
//! delimiter and the group-delimiter status across lines, so the parser
//! can drive it per input line.

pub mod lexer;
pub mod token;

pub use lexer::Tokenizer;
pub use token::{Token, TokenKind};

use crate::error::Result;

/// Tokenize a single line with fresh scanner state.
///
/// Mostly useful for inspection and tests; the parser keeps a `Tokenizer`
/// alive across lines instead.
pub fn scan_line(line: &str) -> Result<Vec<Token>> {
    Tokenizer::new().tokenize(line)
}
