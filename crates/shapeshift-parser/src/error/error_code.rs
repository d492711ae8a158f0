//! Error codes for the Shapeshift diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Input-shape errors found before scanning
//! - `E1xx` - Structural errors found while scanning
//! - `E2xx` - Label errors
//! - `E3xx` - Kind-constraint errors

use std::fmt;

/// Error codes for categorizing parse failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Input-Shape Errors (E0xx)
    // =========================================================================
    /// Empty input.
    ///
    /// The document is empty or contains only whitespace.
    E001,

    /// Invalid character.
    ///
    /// The document contains a character other than ASCII letters, digits,
    /// `(`, `)`, `[` and `]`. An in-memory document may only carry whitespace
    /// around its ends; a streamed document may also have it between tokens.
    E002,

    /// Unbalanced circles.
    ///
    /// The total count of `(` and `)` is odd.
    E003,

    /// Unbalanced squares.
    ///
    /// The total count of `[` and `]` is odd.
    E004,

    /// No shapes found.
    ///
    /// The document contains no bracket of either kind.
    E005,

    // =========================================================================
    // Structural Errors (E1xx)
    // =========================================================================
    /// Unexpected character.
    ///
    /// A character was found where a circle or square was expected, or
    /// content remains after the last top-level shape.
    E100,

    /// Unexpected end of input.
    ///
    /// The input ended before a shape was closed.
    E101,

    /// Nesting too deep.
    ///
    /// Shapes are nested beyond the supported depth.
    E102,

    /// Read failure.
    ///
    /// The underlying character source reported an I/O error.
    E103,

    // =========================================================================
    // Label Errors (E2xx)
    // =========================================================================
    /// Invalid circle label.
    ///
    /// Circle labels consist of one or more uppercase letters `A`-`Z`.
    E200,

    /// Invalid square label.
    ///
    /// Square labels consist of one or more digits `0`-`9`.
    E201,

    // =========================================================================
    // Kind-Constraint Errors (E3xx)
    // =========================================================================
    /// Non-square inside a square.
    ///
    /// Squares may only contain squares.
    E300,
}

/// The parsing phase an [`ErrorCode`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Whole-document checks run before scanning.
    InputShape,
    /// Grammar violations found while scanning.
    Structural,
    /// A label failed validation.
    Label,
    /// A child of the wrong kind was attached.
    KindConstraint,
}

impl ErrorCode {
    /// Returns the phase this code belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::E001
            | ErrorCode::E002
            | ErrorCode::E003
            | ErrorCode::E004
            | ErrorCode::E005 => ErrorCategory::InputShape,
            ErrorCode::E100 | ErrorCode::E101 | ErrorCode::E102 | ErrorCode::E103 => {
                ErrorCategory::Structural
            }
            ErrorCode::E200 | ErrorCode::E201 => ErrorCategory::Label,
            ErrorCode::E300 => ErrorCategory::KindConstraint,
        }
    }

    /// Returns the code as a string slice, e.g. `"E101"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E005 => "E005",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E300 => "E300",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
