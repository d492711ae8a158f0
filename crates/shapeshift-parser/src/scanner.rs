//! Buffered character scanner.
//!
//! The [`Scanner`] pulls input from any [`Read`] source into a fixed-size
//! buffer and exposes one character of lookahead. It tracks the absolute
//! offset, the line number and where the current line starts, so a
//! [`Location`] can be produced at any point.
//!
//! ```text
//!                        buffer_offset
//!                        v
//! [a|b|c|d|e|f|g|h|i|j|k|l|m|n|o|p|q|r|s|t]        < input
//!                       [l|m|n|o|p|q|r|s|t|?|?]    < buffer
//!                           ^               ^
//!                           index           fill
//! ```
//!
//! `index` always points one past the current character.
//!
//! Labels are captured in place. When the buffer is refilled in the middle of
//! a capture, the part captured so far is copied into an accumulator first, so
//! the captured text never depends on the buffer size.

use std::{
    io::{self, Read},
    mem,
    num::NonZeroUsize,
};

use crate::location::Location;

/// Smallest buffer the parser will scan with.
pub const MIN_BUFFER_SIZE: usize = 10;

/// Buffer size used when the input length is unknown.
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Pick a buffer size for an in-memory input of `len` bytes.
///
/// The result is `len` clamped to `[MIN_BUFFER_SIZE, DEFAULT_BUFFER_SIZE]`.
pub fn buffer_size_for_len(len: usize) -> NonZeroUsize {
    clamp_buffer_size(len.min(DEFAULT_BUFFER_SIZE))
}

/// Raise a requested buffer size to at least [`MIN_BUFFER_SIZE`].
pub fn clamp_buffer_size(size: usize) -> NonZeroUsize {
    NonZeroUsize::new(size.max(MIN_BUFFER_SIZE)).unwrap_or(NonZeroUsize::MIN)
}

/// Grammar whitespace: space, tab, line feed and carriage return.
pub(crate) fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// Single-character lookahead over a buffered [`Read`] source.
#[derive(Debug)]
pub(crate) struct Scanner<R> {
    reader: R,
    buffer: Box<[u8]>,
    /// Absolute offset of `buffer[0]`.
    buffer_offset: usize,
    index: usize,
    fill: usize,
    line: usize,
    /// Absolute offset of the first character of the current line.
    line_offset: usize,
    current: Option<u8>,
    eof: bool,
    capture: Vec<u8>,
    capture_start: Option<usize>,
}

impl<R: Read> Scanner<R> {
    /// Create a scanner with a buffer of `capacity` bytes.
    ///
    /// Nothing is read until the first call to [`Scanner::advance`].
    pub(crate) fn new(reader: R, capacity: NonZeroUsize) -> Self {
        Self {
            reader,
            buffer: vec![0; capacity.get()].into_boxed_slice(),
            buffer_offset: 0,
            index: 0,
            fill: 0,
            line: 1,
            line_offset: 0,
            current: None,
            eof: false,
            capture: Vec::new(),
            capture_start: None,
        }
    }

    /// The current lookahead character, or `None` at end of input.
    pub(crate) fn current(&self) -> Option<u8> {
        self.current
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.eof
    }

    /// Move to the next character, refilling the buffer when it runs out.
    ///
    /// Once the source is exhausted the scanner stays at end of input.
    ///
    /// # Errors
    ///
    /// Propagates read errors from the source. Interrupted reads are retried.
    pub(crate) fn advance(&mut self) -> io::Result<()> {
        if self.eof {
            return Ok(());
        }

        if self.index == self.fill {
            if let Some(start) = self.capture_start {
                self.capture
                    .extend_from_slice(&self.buffer[start..self.fill]);
                self.capture_start = Some(0);
            }

            let filled = read_chunk(&mut self.reader, &mut self.buffer)?;
            self.buffer_offset += self.fill;
            self.fill = filled;
            self.index = 0;

            if filled == 0 {
                self.current = None;
                self.eof = true;
                return Ok(());
            }
        }

        if self.current == Some(b'\n') {
            self.line += 1;
            self.line_offset = self.buffer_offset + self.index;
        }

        self.current = Some(self.buffer[self.index]);
        self.index += 1;
        Ok(())
    }

    /// Skip grammar whitespace.
    pub(crate) fn skip_whitespace(&mut self) -> io::Result<()> {
        while self.current.is_some_and(is_whitespace) {
            self.advance()?;
        }
        Ok(())
    }

    /// Consume `expected` if it is the current character.
    pub(crate) fn eat(&mut self, expected: u8) -> io::Result<bool> {
        if self.current != Some(expected) {
            return Ok(false);
        }
        self.advance()?;
        Ok(true)
    }

    /// Location of the current character.
    ///
    /// At end of input this is the position just past the last character.
    pub(crate) fn location(&self) -> Location {
        let offset = self.buffer_offset + self.cursor();
        Location::new(offset, self.line, offset - self.line_offset + 1)
    }

    /// Start capturing at the current character.
    pub(crate) fn start_capture(&mut self) {
        self.capture_start = Some(self.cursor());
    }

    /// Stop capturing and return everything from the capture start up to,
    /// but excluding, the current character.
    pub(crate) fn end_capture(&mut self) -> String {
        let end = self.cursor();
        let start = self.capture_start.take().unwrap_or(end);

        if self.capture.is_empty() {
            return String::from_utf8_lossy(&self.buffer[start..end]).into_owned();
        }

        self.capture.extend_from_slice(&self.buffer[start..end]);
        let captured = mem::take(&mut self.capture);
        String::from_utf8_lossy(&captured).into_owned()
    }

    /// Buffer position of the current character.
    fn cursor(&self) -> usize {
        self.index.saturating_sub(1)
    }
}

fn read_chunk<R: Read>(reader: &mut R, buffer: &mut [u8]) -> io::Result<usize> {
    loop {
        match reader.read(buffer) {
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner(input: &str, capacity: usize) -> Scanner<&[u8]> {
        let capacity = NonZeroUsize::new(capacity).unwrap();
        Scanner::new(input.as_bytes(), capacity)
    }

    /// Hands out at most one byte per read and fails with `Interrupted` every
    /// other call.
    struct Trickle<'a> {
        bytes: &'a [u8],
        interrupt: bool,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            let Some((first, rest)) = self.bytes.split_first() else {
                return Ok(0);
            };
            buf[0] = *first;
            self.bytes = rest;
            Ok(1)
        }
    }

    fn capture_label<R: Read>(scanner: &mut Scanner<R>) -> String {
        scanner.start_capture();
        scanner.advance().unwrap();
        while scanner.current().is_some_and(|b| b.is_ascii_alphanumeric()) {
            scanner.advance().unwrap();
        }
        scanner.end_capture()
    }

    #[test]
    fn test_buffer_size_for_len() {
        assert_eq!(buffer_size_for_len(0).get(), MIN_BUFFER_SIZE);
        assert_eq!(buffer_size_for_len(3).get(), MIN_BUFFER_SIZE);
        assert_eq!(buffer_size_for_len(42).get(), 42);
        assert_eq!(buffer_size_for_len(1_000_000).get(), DEFAULT_BUFFER_SIZE);
    }

    #[test]
    fn test_clamp_buffer_size() {
        assert_eq!(clamp_buffer_size(1).get(), MIN_BUFFER_SIZE);
        assert_eq!(clamp_buffer_size(4096).get(), 4096);
    }

    #[test]
    fn test_location_tracks_lines() {
        let mut scanner = scanner("a\nbc", 2);

        scanner.advance().unwrap();
        assert_eq!(scanner.current(), Some(b'a'));
        assert_eq!(scanner.location(), Location::new(0, 1, 1));

        scanner.advance().unwrap();
        assert_eq!(scanner.current(), Some(b'\n'));
        assert_eq!(scanner.location(), Location::new(1, 1, 2));

        scanner.advance().unwrap();
        assert_eq!(scanner.current(), Some(b'b'));
        assert_eq!(scanner.location(), Location::new(2, 2, 1));

        scanner.advance().unwrap();
        assert_eq!(scanner.location(), Location::new(3, 2, 2));

        scanner.advance().unwrap();
        assert!(scanner.is_eof());
        assert_eq!(scanner.current(), None);
        assert_eq!(scanner.location(), Location::new(4, 2, 3));
    }

    #[test]
    fn test_eof_is_idempotent() {
        let mut scanner = scanner("x", 4);
        scanner.advance().unwrap();
        scanner.advance().unwrap();
        assert!(scanner.is_eof());
        let at_end = scanner.location();

        scanner.advance().unwrap();
        scanner.advance().unwrap();
        assert!(scanner.is_eof());
        assert_eq!(scanner.location(), at_end);
    }

    #[test]
    fn test_empty_input() {
        let mut scanner = scanner("", 1);
        scanner.advance().unwrap();
        assert!(scanner.is_eof());
        assert_eq!(scanner.location(), Location::start());
    }

    #[test]
    fn test_skip_whitespace_and_eat() {
        let mut scanner = scanner(" \t\r\n (", 3);
        scanner.advance().unwrap();
        scanner.skip_whitespace().unwrap();
        assert_eq!(scanner.location(), Location::new(5, 2, 2));
        assert!(!scanner.eat(b'[').unwrap());
        assert!(scanner.eat(b'(').unwrap());
        assert!(scanner.is_eof());
    }

    #[test]
    fn test_capture_survives_refills() {
        let input = "  HELLOWORLD42)";
        for capacity in 1..=20 {
            let mut scanner = scanner(input, capacity);
            scanner.advance().unwrap();
            scanner.skip_whitespace().unwrap();

            assert_eq!(
                capture_label(&mut scanner),
                "HELLOWORLD42",
                "capacity {capacity}"
            );
            assert_eq!(scanner.current(), Some(b')'), "capacity {capacity}");
        }
    }

    #[test]
    fn test_capture_until_end_of_input() {
        for capacity in 1..=6 {
            let mut scanner = scanner("ABC", capacity);
            scanner.advance().unwrap();
            assert_eq!(capture_label(&mut scanner), "ABC", "capacity {capacity}");
            assert!(scanner.is_eof());
        }
    }

    #[test]
    fn test_capture_always_takes_first_character() {
        let mut scanner = scanner("[]", 4);
        scanner.advance().unwrap();
        assert_eq!(capture_label(&mut scanner), "[");
        assert_eq!(scanner.current(), Some(b']'));
    }

    #[test]
    fn test_consecutive_captures_do_not_leak() {
        let mut scanner = scanner("ABCDE 12345", 2);
        scanner.advance().unwrap();
        assert_eq!(capture_label(&mut scanner), "ABCDE");
        scanner.skip_whitespace().unwrap();
        assert_eq!(capture_label(&mut scanner), "12345");
    }

    #[test]
    fn test_interrupted_reads_are_retried() {
        let reader = Trickle {
            bytes: b"(AB\nC",
            interrupt: false,
        };
        let mut scanner = Scanner::new(reader, NonZeroUsize::new(8).unwrap());
        scanner.advance().unwrap();
        assert!(scanner.eat(b'(').unwrap());
        assert_eq!(capture_label(&mut scanner), "AB");
        scanner.skip_whitespace().unwrap();
        assert_eq!(scanner.location(), Location::new(4, 2, 1));
        assert_eq!(capture_label(&mut scanner), "C");
        assert!(scanner.is_eof());
    }
}
