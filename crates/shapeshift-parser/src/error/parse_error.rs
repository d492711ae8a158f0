//! The ParseError type returned by every failed parse.

use thiserror::Error;

use crate::{error::ErrorCode, location::Location};

/// A type alias for `Result<T, ParseError>`.
pub type Result<T> = std::result::Result<T, ParseError>;

/// A fatal parse failure.
///
/// Carries an [`ErrorCode`], a message and the [`Location`] at which the
/// parser stopped. Values are built once and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("error[{code}]: {message} at {location}")]
pub struct ParseError {
    code: ErrorCode,
    message: String,
    location: Location,
    help: Option<String>,
}

impl ParseError {
    /// Create a parse error.
    pub fn new(code: ErrorCode, message: impl Into<String>, location: Location) -> Self {
        Self {
            code,
            message: message.into(),
            location,
            help: None,
        }
    }

    /// Attach help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the location at which parsing stopped.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}
