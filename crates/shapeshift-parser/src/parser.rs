//! Descent parser over the buffered [`Scanner`].
//!
//! The grammar:
//!
//! ```text
//! document := ws* value (ws* value)* ws*
//! value    := circle | square
//! circle   := '(' ws* label (ws* value)* ws* ')'
//! square   := '[' ws* label (ws* value)* ws* ']'
//! label    := any character, then alphanumerics
//! ```
//!
//! The first label character is always consumed, even when it is not
//! alphanumeric, so that `([])` reports an invalid label rather than a
//! missing one. Circle labels must then be uppercase letters and square
//! labels digits.

use std::{
    io::{self, Read},
    num::NonZeroUsize,
};

use log::{debug, trace};

use shapeshift_core::ShapeError;

use crate::{
    error::{ErrorCode, ParseError, Result},
    handler::ShapesHandler,
    location::Location,
    scanner::{DEFAULT_BUFFER_SIZE, Scanner, buffer_size_for_len, clamp_buffer_size},
    validate::{ALLOWED_CHARACTERS_HELP, empty_input, is_shape_byte, validate_document},
};

/// Deepest supported nesting of shapes.
pub const MAX_NESTING_LEVEL: usize = 1000;

fn is_circle_label(label: &str) -> bool {
    !label.is_empty() && label.bytes().all(|b| b.is_ascii_uppercase())
}

fn is_square_label(label: &str) -> bool {
    !label.is_empty() && label.bytes().all(|b| b.is_ascii_digit())
}

fn describe_byte(byte: u8) -> String {
    if byte.is_ascii() {
        format!("`{}`", char::from(byte).escape_debug())
    } else {
        format!("byte 0x{byte:02X}")
    }
}

/// Streaming parser that reports what it reads to a [`ShapesHandler`].
///
/// # Examples
///
/// ```
/// use shapeshift_parser::{Parser, TreeBuilder};
///
/// let mut builder = TreeBuilder::new();
/// Parser::new(&mut builder).parse_str("[12](BALL)").unwrap();
///
/// let forest = builder.into_forest();
/// assert_eq!(forest.len(), 2);
/// assert_eq!(forest[1].label(), "BALL");
/// ```
#[derive(Debug)]
pub struct Parser<'h, H> {
    handler: &'h mut H,
    buffer_size: Option<NonZeroUsize>,
}

impl<'h, H: ShapesHandler> Parser<'h, H> {
    /// Create a parser that reports events to `handler`.
    pub fn new(handler: &'h mut H) -> Self {
        Self {
            handler,
            buffer_size: None,
        }
    }

    /// Override the scan buffer size.
    ///
    /// The effective size is never below
    /// [`MIN_BUFFER_SIZE`](crate::MIN_BUFFER_SIZE).
    pub fn with_buffer_size(mut self, size: NonZeroUsize) -> Self {
        self.buffer_size = Some(size);
        self
    }

    /// Parse an in-memory document.
    ///
    /// The document is validated as a whole first, then scanned with a buffer
    /// sized from its length unless a size was set explicitly.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] encountered.
    pub fn parse_str(&mut self, text: &str) -> Result<()> {
        validate_document(text)?;

        let size = match self.buffer_size {
            Some(size) => clamp_buffer_size(size.get()),
            None => buffer_size_for_len(text.len()),
        };
        self.run(text.as_bytes(), size)
    }

    /// Parse a document read incrementally from `reader`.
    ///
    /// Malformed input is reported as it is scanned. See the
    /// [crate docs](crate) for how this differs from
    /// [`parse_str`](Self::parse_str).
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] encountered. Read failures are
    /// reported as [`ErrorCode::E103`].
    pub fn parse_reader<R: Read>(&mut self, reader: R) -> Result<()> {
        let size = self.buffer_size.map_or(DEFAULT_BUFFER_SIZE, NonZeroUsize::get);
        self.run(reader, clamp_buffer_size(size))
    }

    fn run<R: Read>(&mut self, reader: R, buffer_size: NonZeroUsize) -> Result<()> {
        debug!(buffer_size = buffer_size.get(); "Parsing shapes");

        let mut descent = Descent {
            scanner: Scanner::new(reader, buffer_size),
            handler: &mut *self.handler,
            open: Vec::new(),
        };
        descent.document()
    }
}

/// A shape whose closing bracket has not been read yet.
enum Open<C, S> {
    Circle { node: C, label: String },
    Square { node: S, label: String },
}

impl<C, S> Open<C, S> {
    fn close(&self) -> u8 {
        match self {
            Open::Circle { .. } => b')',
            Open::Square { .. } => b']',
        }
    }
}

/// State of a single parse.
///
/// Open shapes live on an explicit stack, so nesting depth costs heap rather
/// than call stack.
struct Descent<'a, H: ShapesHandler, R> {
    scanner: Scanner<R>,
    handler: &'a mut H,
    open: Vec<Open<H::Circle, H::Square>>,
}

/// Generate the method that opens one kind of shape: its bracket and label.
///
/// Circles and squares share their structure and differ only in label rule
/// and handler callbacks.
macro_rules! open_shape {
    (
        $fn_name:ident,
        variant: $variant:ident,
        kind: $kind:literal,
        label: $is_label:ident => $label_code:ident, $label_help:literal,
        start: $start:ident,
        start_label: $start_label:ident,
        end_label: $end_label:ident $(,)?
    ) => {
        fn $fn_name(&mut self) -> Result<()> {
            let at = self.location();
            let mut node = self.handler.$start(at);
            self.advance()?;
            self.check_depth()?;
            self.skip_whitespace()?;

            let at = self.location();
            self.handler.$start_label(&mut node, at);
            let label = self.label()?;
            if !$is_label(&label) {
                return Err(self
                    .error(
                        ErrorCode::$label_code,
                        format!(concat!("invalid ", $kind, " label `{}`"), label.escape_debug()),
                    )
                    .with_help($label_help));
            }
            let at = self.location();
            self.handler.$end_label(&mut node, &label, at);
            self.skip_whitespace()?;

            self.open.push(Open::$variant { node, label });
            Ok(())
        }
    };
}

impl<H: ShapesHandler, R: Read> Descent<'_, H, R> {
    fn document(&mut self) -> Result<()> {
        self.advance()?;
        self.skip_whitespace()?;
        if self.scanner.is_eof() {
            return Err(empty_input());
        }

        loop {
            self.value()?;
            let at = self.location();
            self.handler.fold(at);
            self.skip_whitespace()?;
            if self.scanner.is_eof() {
                return Ok(());
            }
        }
    }

    /// Parse one complete top-level value.
    fn value(&mut self) -> Result<()> {
        loop {
            self.open_value()?;

            while let Some(close) = self.open.last().map(Open::close) {
                if !self.eat(close)? {
                    self.start_child();
                    break;
                }
                self.close_shape()?;
            }

            if self.open.is_empty() {
                return Ok(());
            }
        }
    }

    fn open_value(&mut self) -> Result<()> {
        match self.scanner.current() {
            Some(b'(') => self.open_circle(),
            Some(b'[') => self.open_square(),
            Some(other) if !is_shape_byte(other) => Err(self.invalid_character(other)),
            Some(other) => Err(self
                .error(
                    ErrorCode::E100,
                    format!("unexpected character {}", describe_byte(other)),
                )
                .with_help("expected a circle `(` or a square `[`")),
            None => Err(self.error(ErrorCode::E101, "unexpected end of input")),
        }
    }

    open_shape!(
        open_circle,
        variant: Circle,
        kind: "circle",
        label: is_circle_label => E200, "circle labels are one or more uppercase letters `A`-`Z`",
        start: start_circle,
        start_label: start_circle_label,
        end_label: end_circle_label,
    );

    open_shape!(
        open_square,
        variant: Square,
        kind: "square",
        label: is_square_label => E201, "square labels are one or more digits `0`-`9`",
        start: start_square,
        start_label: start_square_label,
        end_label: end_square_label,
    );

    fn start_child(&mut self) {
        let at = self.location();
        match self.open.last_mut() {
            Some(Open::Circle { node, label }) => self.handler.start_circle_child(node, label, at),
            Some(Open::Square { node, label }) => self.handler.start_square_child(node, label, at),
            None => {}
        }
    }

    /// Finish the innermost open shape, whose closing bracket was just read,
    /// and hand it to its parent.
    fn close_shape(&mut self) -> Result<()> {
        let Some(shape) = self.open.pop() else {
            return Ok(());
        };

        let at = self.location();
        let depth = self.open.len();
        match shape {
            Open::Circle { node, label } => {
                self.handler.end_circle(node, at);
                trace!(kind = "circle", label = label.as_str(), depth; "Shape parsed");
            }
            Open::Square { node, label } => {
                self.handler.end_square(node, at);
                trace!(kind = "square", label = label.as_str(), depth; "Shape parsed");
            }
        }

        let attached = match self.open.last_mut() {
            Some(Open::Circle { node, label }) => self.handler.end_circle_child(node, label, at),
            Some(Open::Square { node, label }) => self.handler.end_square_child(node, label, at),
            None => return Ok(()),
        };
        attached.map_err(|err| Self::kind_error(err, at))?;
        self.skip_whitespace()
    }

    /// Read a label: always the current character, then any alphanumerics.
    fn label(&mut self) -> Result<String> {
        if let Some(byte) = self.scanner.current().filter(|&b| !is_shape_byte(b)) {
            return Err(self.invalid_character(byte));
        }

        self.scanner.start_capture();
        self.advance()?;
        while self
            .scanner
            .current()
            .is_some_and(|b| b.is_ascii_alphanumeric())
        {
            self.advance()?;
        }
        Ok(self.scanner.end_capture())
    }

    fn check_depth(&self) -> Result<()> {
        if self.open.len() >= MAX_NESTING_LEVEL {
            return Err(self
                .error(ErrorCode::E102, "nesting too deep")
                .with_help(format!("shapes nest at most {MAX_NESTING_LEVEL} levels deep")));
        }
        Ok(())
    }

    fn advance(&mut self) -> Result<()> {
        self.scanner.advance().map_err(|err| self.io_error(err))
    }

    fn skip_whitespace(&mut self) -> Result<()> {
        self.scanner
            .skip_whitespace()
            .map_err(|err| self.io_error(err))
    }

    fn eat(&mut self, expected: u8) -> Result<bool> {
        self.scanner.eat(expected).map_err(|err| self.io_error(err))
    }

    fn location(&self) -> Location {
        self.scanner.location()
    }

    fn error(&self, code: ErrorCode, message: impl Into<String>) -> ParseError {
        let err = ParseError::new(code, message, self.location());
        debug!(code = err.code().as_str(), location = err.location().to_string(); "Parse failed");
        err
    }

    fn invalid_character(&self, byte: u8) -> ParseError {
        self.error(
            ErrorCode::E002,
            format!("invalid character {}", describe_byte(byte)),
        )
        .with_help(ALLOWED_CHARACTERS_HELP)
    }

    fn io_error(&self, err: io::Error) -> ParseError {
        self.error(ErrorCode::E103, format!("failed to read input: {err}"))
    }

    /// The location is where the parent noticed the child, which is just past
    /// the child's closing bracket rather than its start.
    fn kind_error(err: ShapeError, at: Location) -> ParseError {
        debug!(location = at.to_string(); "Rejected child shape");
        ParseError::new(ErrorCode::E300, err.to_string(), at)
            .with_help("squares may only contain squares")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every event as a line of text.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl ShapesHandler for Recorder {
        type Circle = ();
        type Square = ();

        fn start_circle(&mut self, at: Location) {
            self.events.push(format!("start_circle@{}", at.offset()));
        }

        fn end_circle_label(&mut self, _circle: &mut (), label: &str, _at: Location) {
            self.events.push(format!("circle_label {label}"));
        }

        fn start_circle_child(&mut self, _circle: &mut (), label: &str, _at: Location) {
            self.events.push(format!("start_circle_child {label}"));
        }

        fn end_circle_child(
            &mut self,
            _circle: &mut (),
            label: &str,
            _at: Location,
        ) -> std::result::Result<(), ShapeError> {
            self.events.push(format!("end_circle_child {label}"));
            Ok(())
        }

        fn end_circle(&mut self, _circle: (), at: Location) {
            self.events.push(format!("end_circle@{}", at.offset()));
        }

        fn start_square(&mut self, at: Location) {
            self.events.push(format!("start_square@{}", at.offset()));
        }

        fn end_square_label(&mut self, _square: &mut (), label: &str, _at: Location) {
            self.events.push(format!("square_label {label}"));
        }

        fn end_square(&mut self, _square: (), at: Location) {
            self.events.push(format!("end_square@{}", at.offset()));
        }

        fn fold(&mut self, _at: Location) {
            self.events.push("fold".to_string());
        }
    }

    fn record(text: &str) -> Vec<String> {
        let mut recorder = Recorder::default();
        Parser::new(&mut recorder).parse_str(text).unwrap();
        recorder.events
    }

    #[test]
    fn test_event_order() {
        assert_eq!(
            record("(A[1])"),
            [
                "start_circle@0",
                "circle_label A",
                "start_circle_child A",
                "start_square@2",
                "square_label 1",
                "end_square@5",
                "end_circle_child A",
                "end_circle@6",
                "fold",
            ]
        );
    }

    #[test]
    fn test_fold_once_per_top_level_shape() {
        let events = record("[1][2](B)");
        assert_eq!(events.iter().filter(|e| *e == "fold").count(), 3);
    }

    #[test]
    fn test_label_rules() {
        assert!(is_circle_label("A"));
        assert!(is_circle_label("CHARLIE"));
        assert!(!is_circle_label(""));
        assert!(!is_circle_label("Ab"));
        assert!(!is_circle_label("A1"));
        assert!(!is_circle_label("["));

        assert!(is_square_label("0"));
        assert!(is_square_label("12345"));
        assert!(!is_square_label(""));
        assert!(!is_square_label("1A"));
        assert!(!is_square_label("("));
    }

    #[test]
    fn test_whitespace_between_tokens_in_streams() {
        let mut recorder = Recorder::default();
        Parser::new(&mut recorder)
            .parse_reader(" ( A\n [ 1 ]\t) \r\n[2] ".as_bytes())
            .unwrap();

        let labels: Vec<_> = recorder
            .events
            .iter()
            .filter(|e| e.contains("_label"))
            .cloned()
            .collect();
        assert_eq!(labels, ["circle_label A", "square_label 1", "square_label 2"]);
    }

    #[test]
    fn test_empty_stream_is_empty_input() {
        for text in ["", "  \n", "\t\r\n "] {
            let mut recorder = Recorder::default();
            let err = Parser::new(&mut recorder)
                .parse_reader(text.as_bytes())
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::E001, "input {text:?}");
            assert_eq!(err.location(), Location::start());
            assert!(recorder.events.is_empty());
        }
    }

    #[test]
    fn test_foreign_bytes_in_stream() {
        let mut recorder = Recorder::default();
        let err = Parser::new(&mut recorder)
            .parse_reader("$$$".as_bytes())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::E002);
        assert_eq!(err.message(), "invalid character `$`");

        let err = Parser::new(&mut recorder)
            .parse_reader("(A €)".as_bytes())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::E002);
        assert_eq!(err.location(), Location::new(3, 1, 4));
        assert_eq!(err.message(), "invalid character byte 0xE2");

        let err = Parser::new(&mut recorder)
            .parse_reader("(%)".as_bytes())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::E002);
    }

    #[test]
    fn test_nesting_at_ceiling_on_default_stack() {
        let depth = MAX_NESTING_LEVEL;
        let text = format!("{}{}", "[1".repeat(depth), "]".repeat(depth));

        let mut recorder = Recorder::default();
        Parser::new(&mut recorder).parse_str(&text).unwrap();
        assert_eq!(recorder.events.last().map(String::as_str), Some("fold"));
        assert_eq!(
            recorder.events.iter().filter(|e| e.starts_with("end_square@")).count(),
            depth
        );
    }

    #[test]
    fn test_read_failure_is_reported() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("disk on fire"))
            }
        }

        let mut recorder = Recorder::default();
        let err = Parser::new(&mut recorder).parse_reader(Broken).unwrap_err();
        assert_eq!(err.code(), ErrorCode::E103);
        assert!(err.message().contains("disk on fire"));
    }
}
