//! Source positions for diagnostics.

use std::fmt;

/// A point in the input stream.
///
/// `offset` is the absolute byte offset from the start of the input. Lines and
/// columns are 1-based; the column counts from the start of the current line.
/// For the accepted alphabet one byte is one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    offset: usize,
    line: usize,
    column: usize,
}

impl Location {
    /// Create a location from its parts.
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// The very first position of an input.
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }

    /// Compute the location of a byte offset inside an in-memory document.
    ///
    /// Offsets past the end of `text` are clamped to its length.
    pub fn of_offset(text: &str, offset: usize) -> Self {
        let offset = offset.min(text.len());
        let before = &text.as_bytes()[..offset];
        let line = 1 + before.iter().filter(|&&b| b == b'\n').count();
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |newline| newline + 1);
        Self::new(offset, line, offset - line_start + 1)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
