//! Whole-document checks run before scanning an in-memory input.
//!
//! These are coarse, fail-fast checks that give early and readable
//! diagnostics. They do not replace the structural checks done while
//! scanning: nesting depth and square contents are only caught there.

use log::debug;

use crate::{
    error::{ErrorCode, ParseError, Result},
    location::Location,
    scanner::is_whitespace,
};

pub(crate) const ALLOWED_CHARACTERS_HELP: &str =
    "only letters, digits, `(`, `)`, `[` and `]` are allowed";

fn is_blank(c: char) -> bool {
    c.is_ascii() && is_whitespace(c as u8)
}

/// Letters, digits and brackets: the bytes a document is made of, besides
/// whitespace between tokens.
pub(crate) fn is_shape_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'(' | b')' | b'[' | b']')
}

fn is_allowed(c: char) -> bool {
    c.is_ascii() && is_shape_byte(c as u8)
}

/// The error for a document with nothing but whitespace in it.
pub(crate) fn empty_input() -> ParseError {
    debug!("Rejected empty document");
    ParseError::new(
        ErrorCode::E001,
        "empty input: no shapes data",
        Location::start(),
    )
    .with_help("write at least one circle `(A)` or square `[1]`")
}

/// Validate the document as a whole.
///
/// The text is first trimmed of grammar whitespace. It is rejected when it is
/// empty, contains a character other than ASCII letters, digits and brackets,
/// has an odd number of round or square brackets, or contains no bracket at
/// all. The checks run in that order and the first failure is returned.
pub(crate) fn validate_document(text: &str) -> Result<()> {
    let trimmed = text.trim_matches(is_blank);
    let lead = text.len() - text.trim_start_matches(is_blank).len();
    let first = Location::of_offset(text, lead);

    if trimmed.is_empty() {
        return Err(empty_input());
    }

    if let Some((index, c)) = trimmed.char_indices().find(|&(_, c)| !is_allowed(c)) {
        let location = Location::of_offset(text, lead + index);
        debug!(character:? = c, offset = location.offset(); "Rejected invalid character");
        return Err(ParseError::new(
            ErrorCode::E002,
            format!("invalid character `{}`", c.escape_debug()),
            location,
        )
        .with_help(ALLOWED_CHARACTERS_HELP));
    }

    let circles = trimmed.bytes().filter(|&b| matches!(b, b'(' | b')')).count();
    let squares = trimmed.bytes().filter(|&b| matches!(b, b'[' | b']')).count();

    if circles % 2 != 0 {
        debug!(circles; "Rejected unbalanced circles");
        return Err(ParseError::new(
            ErrorCode::E003,
            "unbalanced circles: mismatching `(` and `)`",
            first,
        )
        .with_help("every `(` needs a matching `)`"));
    }

    if squares % 2 != 0 {
        debug!(squares; "Rejected unbalanced squares");
        return Err(ParseError::new(
            ErrorCode::E004,
            "unbalanced squares: mismatching `[` and `]`",
            first,
        )
        .with_help("every `[` needs a matching `]`"));
    }

    if circles == 0 && squares == 0 {
        debug!("Rejected document without shapes");
        return Err(ParseError::new(ErrorCode::E005, "no shapes found", first)
            .with_help("wrap labels in `(...)` for circles or `[...]` for squares"));
    }

    Ok(())
}
