// nmlio/src/error.rs

//! Error types for namelist reading and writing.

use thiserror::Error;

/// Result type alias for namelist operations.
pub type Result<T> = std::result::Result<T, NmlError>;

/// Errors that can occur when reading or writing Fortran namelists.
///
/// Malformed namelist constructs (index-qualified assignments, content
/// outside a group, unsupported syntax) are skipped rather than reported;
/// only I/O failures and grammar-assumption violations surface here.
#[derive(Debug, Error)]
pub enum NmlError {
    /// I/O error when reading or writing files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The tokenizer met a character outside its classification set.
    /// The punctuation set is exhaustive over expected namelist input,
    /// so this indicates input the grammar makes no promise about.
    #[error("unexpected character '{character}' at line {line}, column {column}")]
    UnexpectedCharacter {
        character: char,
        line: usize,
        column: usize,
    },

    /// JSON serialization/deserialization error
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
