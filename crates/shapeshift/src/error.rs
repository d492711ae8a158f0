//! Error types for Shapeshift operations.
//!
//! [`ShapeshiftError`] wraps everything that can go wrong between reading a
//! document and rendering it.

use std::io;

use thiserror::Error;

use shapeshift_parser::ParseError;

/// The main error type for Shapeshift operations.
///
/// The `Parse` variant keeps the document text next to the structured
/// [`ParseError`] so callers can render a diagnostic that points into it.
/// For streamed documents the text is not retained and `src` is empty.
#[derive(Debug, Error)]
pub enum ShapeshiftError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ShapeshiftError {
    /// Create a new `Parse` error with the associated document text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
