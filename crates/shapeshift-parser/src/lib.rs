//! # Shapeshift Parser
//!
//! Streaming parser for the Shapeshift bracket notation. A document is a
//! forest of circles `(LABEL ...)` and squares `[123 ...]`:
//!
//! ```text
//! [12](BALL(INK[1[35]](CHARLIE)))
//! ```
//!
//! Circle labels are uppercase letters, square labels are digits, and squares
//! may only contain squares.
//!
//! The [`Parser`] reads characters through a bounded buffer and reports what it
//! recognizes to a [`ShapesHandler`]. The default handler, [`TreeBuilder`],
//! builds a [`Container`](shapeshift_core::Container) of shapes.
//!
//! ## In-memory and streamed input
//!
//! [`Parser::parse_str`] checks the whole document before scanning, and that
//! check only allows whitespace around the ends of the document. A streamed
//! document is never held in memory, so [`Parser::parse_reader`] skips that
//! check and accepts whitespace between any two tokens. Both report empty
//! input as E001 and foreign characters as E002. Bracket imbalance and a
//! document without shapes are only caught up front for in-memory input; a
//! stream reports them as structural errors once the scanner reaches them.
//!
//! ## Usage
//!
//! ```
//! # use shapeshift_parser::{parse, ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let container = parse("[12](BALL(INK[1[35]](CHARLIE)))")?;
//!     assert_eq!(container.len(), 2);
//!     Ok(())
//! }
//! ```

pub mod error;

mod handler;
mod location;
mod parser;
mod scanner;
mod tree_builder;
mod validate;

pub use error::{ErrorCode, ParseError};
pub use handler::ShapesHandler;
pub use location::Location;
pub use parser::{MAX_NESTING_LEVEL, Parser};
pub use scanner::{DEFAULT_BUFFER_SIZE, MIN_BUFFER_SIZE, buffer_size_for_len, clamp_buffer_size};
pub use tree_builder::TreeBuilder;

use std::io::Read;

use shapeshift_core::Container;

/// Parse an in-memory document into a [`Container`] of shapes.
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered.
pub fn parse(text: &str) -> Result<Container, ParseError> {
    let mut builder = TreeBuilder::new();
    Parser::new(&mut builder).parse_str(text)?;
    Ok(builder.into_container())
}

/// Parse a document streamed from `reader` into a [`Container`] of shapes.
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered, including read failures.
pub fn parse_reader<R: Read>(reader: R) -> Result<Container, ParseError> {
    let mut builder = TreeBuilder::new();
    Parser::new(&mut builder).parse_reader(reader)?;
    Ok(builder.into_container())
}
