// nmlio/src/tokenizer/token.rs

//! Token types for namelist lexical analysis.

use std::fmt;

/// A single lexeme scanned from one line of namelist text.
///
/// Tokens are transient: they are produced and consumed within one line's
/// processing and never stored in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The classification of this lexeme
    pub kind: TokenKind,
    /// The raw text of the lexeme, delimiters included
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: String) -> Self {
        Self { kind, text }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind, self.text)
    }
}

/// Classes of lexemes produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A maximal run of intra-line whitespace
    Whitespace,
    /// Comment text, or a line scanned before any group was opened
    Comment,
    /// A (possibly partial, line-spanning) string literal
    Str,
    /// Identifier: variable or group name
    Name,
    /// Numeric literal, including signed `inf`/`nan` special values
    Number,
    /// Logical literal (`.true.`, `t`, dot-delimited named constants)
    Logical,
    /// A single punctuation character
    Punct,
    /// Group-open marker (`&` or legacy `$`)
    GroupOpen,
    /// Group-close marker (`/`, or the second `$` of a legacy group)
    GroupClose,
}
