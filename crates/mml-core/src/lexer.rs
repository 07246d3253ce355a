//! Physical line splitting.
//!
//! Splits input on `\n` (stripping a trailing `\r`) using `memchr` for
//! newline scanning, and numbers each line from 1. A trailing newline at
//! end of input does not produce an extra empty line.

use memchr::memchr;

/// A single physical line from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// The line text, without its line terminator.
    pub text: &'a str,
    /// 1-based line number.
    pub number: usize,
}

impl<'a> Line<'a> {
    /// Check if this line contains only whitespace.
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Get the line text with leading/trailing whitespace removed.
    #[inline]
    pub fn trimmed(&self) -> &'a str {
        self.text.trim()
    }
}

/// Iterator over the physical lines of an input string.
pub struct Lexer<'a> {
    input: &'a str,
    /// Current byte offset.
    offset: usize,
    /// Number of lines produced so far.
    count: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            count: 0,
        }
    }

    /// Number of lines consumed so far.
    #[inline]
    pub fn lines_seen(&self) -> usize {
        self.count
    }

    /// Check if all input has been consumed.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.offset >= self.input.len()
    }

    fn read_line(&mut self) -> Option<Line<'a>> {
        if self.is_eof() {
            return None;
        }

        let bytes = self.input.as_bytes();
        let start = self.offset;

        let end = match memchr(b'\n', &bytes[start..]) {
            Some(pos) => start + pos,
            None => bytes.len(),
        };

        // CRLF: drop the CR before the newline
        let text_end = if end > start && bytes[end - 1] == b'\r' {
            end - 1
        } else {
            end
        };

        self.offset = if end < bytes.len() { end + 1 } else { end };
        self.count += 1;

        // `start` and `text_end` sit next to ASCII newline bytes or at the
        // ends of the input, so both are char boundaries.
        Some(Line {
            text: &self.input[start..text_end],
            number: self.count,
        })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Line<'a>;

    #[inline]
    fn next(&mut self) -> Option<Line<'a>> {
        self.read_line()
    }
}
