//! The event-handler protocol driven by the [`Parser`](crate::Parser).
//!
//! A [`ShapesHandler`] receives one callback per construct the parser
//! recognizes. It decides what to build; the parser only decides what the
//! input means. For the document `(A[1])` the calls are:
//!
//! ```text
//! start_circle
//!   start_circle_label, end_circle_label("A")
//!   start_circle_child("A")
//!     start_square
//!       start_square_label, end_square_label("1")
//!     end_square
//!   end_circle_child("A")
//! end_circle
//! fold
//! ```
//!
//! `start_circle` and `start_square` return a handle that is passed back to
//! every later callback for that node and finally moved into `end_circle` or
//! `end_square`. The parser never looks inside a handle. Every callback
//! receives the [`Location`] the parser is at: `start_*` callbacks see the
//! first character of the construct and `end_*` callbacks see the character
//! that follows it.
//!
//! All callbacks default to doing nothing, so a handler only overrides the
//! events it cares about.

use shapeshift_core::ShapeError;

use crate::location::Location;

/// Callbacks for parser events.
pub trait ShapesHandler {
    /// Per-node state for a circle being parsed.
    type Circle: Default;
    /// Per-node state for a square being parsed.
    type Square: Default;

    /// Called on the opening `(` of a circle.
    fn start_circle(&mut self, _at: Location) -> Self::Circle {
        Self::Circle::default()
    }

    /// Called before the circle label is read.
    fn start_circle_label(&mut self, _circle: &mut Self::Circle, _at: Location) {}

    /// Called with the validated circle label.
    fn end_circle_label(&mut self, _circle: &mut Self::Circle, _label: &str, _at: Location) {}

    /// Called before each child of a circle is parsed.
    fn start_circle_child(&mut self, _circle: &mut Self::Circle, _label: &str, _at: Location) {}

    /// Called after a child of a circle was completely parsed.
    ///
    /// # Errors
    ///
    /// A handler may refuse the child; the parse then fails with
    /// [`ErrorCode::E300`](crate::error::ErrorCode::E300).
    fn end_circle_child(
        &mut self,
        _circle: &mut Self::Circle,
        _label: &str,
        _at: Location,
    ) -> Result<(), ShapeError> {
        Ok(())
    }

    /// Called after the closing `)` of a circle.
    fn end_circle(&mut self, _circle: Self::Circle, _at: Location) {}

    /// Called on the opening `[` of a square.
    fn start_square(&mut self, _at: Location) -> Self::Square {
        Self::Square::default()
    }

    /// Called before the square label is read.
    fn start_square_label(&mut self, _square: &mut Self::Square, _at: Location) {}

    /// Called with the validated square label.
    fn end_square_label(&mut self, _square: &mut Self::Square, _label: &str, _at: Location) {}

    /// Called before each child of a square is parsed.
    fn start_square_child(&mut self, _square: &mut Self::Square, _label: &str, _at: Location) {}

    /// Called after a child of a square was completely parsed.
    ///
    /// # Errors
    ///
    /// A handler may refuse the child; the parse then fails with
    /// [`ErrorCode::E300`](crate::error::ErrorCode::E300).
    fn end_square_child(
        &mut self,
        _square: &mut Self::Square,
        _label: &str,
        _at: Location,
    ) -> Result<(), ShapeError> {
        Ok(())
    }

    /// Called after the closing `]` of a square.
    fn end_square(&mut self, _square: Self::Square, _at: Location) {}

    /// Called after each complete top-level shape.
    ///
    /// Carries no shape: the handler tracks which value just completed.
    fn fold(&mut self, _at: Location) {}
}
