//! Error reporting for the Shapeshift parser.
//!
//! Every failure surfaces as a single [`ParseError`] carrying an [`ErrorCode`],
//! a human-readable message, the [`Location`](crate::Location) where parsing
//! stopped and optional help text. Parsing is fail-fast: the first error aborts
//! the parse and nothing is recovered.
//!
//! # Example
//!
//! ```
//! # use shapeshift_parser::Location;
//! # use shapeshift_parser::error::{ErrorCode, ParseError};
//! let err = ParseError::new(ErrorCode::E200, "invalid circle label `ab`", Location::start())
//!     .with_help("circle labels use uppercase letters only");
//!
//! assert_eq!(err.to_string(), "error[E200]: invalid circle label `ab` at 1:1");
//! ```

mod error_code;
mod parse_error;

pub(crate) use parse_error::Result;

pub use error_code::{ErrorCategory, ErrorCode};
pub use parse_error::ParseError;
