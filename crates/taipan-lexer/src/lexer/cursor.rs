//! Character cursor over a decoded source buffer.
//!
//! The scanner works on characters, not bytes: columns are
//! character-counted and lookahead is by whole characters. The cursor
//! decodes the input bytes once up front, normalizes line endings (CRLF
//! becomes LF, a lone CR becomes a space), records an
//! [`InvalidEncoding`](crate::diagnostics::LexError::InvalidEncoding) error
//! for every malformed UTF-8 sequence it skips, and then provides cheap
//! character-indexed access for the rest of the scan.

use taipan_source::types::Position;

use crate::diagnostics::LexError;

/// Character cursor with line/column tracking.
///
/// Lines are 1-indexed and advance on `\n`. Columns are 1-indexed,
/// character-counted, and reset on `\n`. The offset stored in positions is
/// the index into the decoded character stream.
#[derive(Debug, Clone)]
pub struct Cursor {
    /// Decoded source characters
    chars: Vec<char>,
    /// Current read position (character index)
    pos: usize,
    /// Current line
    line: usize,
    /// Current column
    column: usize,
    /// Column to reset to after a newline
    column_origin: usize,
}

impl Cursor {
    /// Decodes `source` and returns a cursor positioned at `(line, column)`.
    ///
    /// Malformed UTF-8 sequences are skipped and reported as
    /// `InvalidEncoding` errors in the returned vector, positioned at the
    /// character location where the bad sequence appeared.
    #[must_use]
    pub fn new(source: &[u8], start_line: usize, start_column: usize) -> (Self, Vec<LexError>) {
        let mut chars = Vec::with_capacity(source.len());
        let mut errors = Vec::new();

        let mut line = start_line;
        let mut column = start_column;
        let mut rest = source;

        while !rest.is_empty() {
            let (valid, bad_len) = match std::str::from_utf8(rest) {
                Ok(valid) => (valid, 0),
                Err(err) => {
                    let valid_up_to = err.valid_up_to();
                    // SAFETY-free split: from_utf8 guarantees the prefix is valid.
                    let (valid, _) = rest.split_at(valid_up_to);
                    let valid = std::str::from_utf8(valid).unwrap_or_default();
                    (valid, err.error_len().unwrap_or(rest.len() - valid_up_to))
                }
            };

            let mut iter = valid.chars().peekable();
            while let Some(c) = iter.next() {
                if c == '\r' {
                    // CRLF collapses to LF; a lone CR is plain whitespace.
                    if iter.peek() == Some(&'\n') {
                        continue;
                    }
                    chars.push(' ');
                    column += 1;
                    continue;
                }

                chars.push(c);
                if c == '\n' {
                    line += 1;
                    column = start_column;
                } else {
                    column += 1;
                }
            }

            rest = &rest[valid.len()..];
            if bad_len > 0 {
                errors.push(LexError::InvalidEncoding { byte: rest[0], line, column });
                rest = &rest[bad_len.min(rest.len())..];
            }
        }

        let cursor = Self {
            chars,
            pos: 0,
            line: start_line,
            column: start_column,
            column_origin: start_column,
        };

        (cursor, errors)
    }

    /// Returns the character at the current position, or `None` at EOF.
    #[must_use]
    pub fn peek(&self) -> Option<char> { self.chars.get(self.pos).copied() }

    /// Returns the character `k` characters ahead (`peek_n(0) == peek()`).
    #[must_use]
    pub fn peek_n(&self, k: usize) -> Option<char> { self.chars.get(self.pos + k).copied() }

    /// Consumes and returns the current character, updating line/column.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;

        if c == '\n' {
            self.line += 1;
            self.column = self.column_origin;
        } else {
            self.column += 1;
        }

        Some(c)
    }

    /// Consumes the current character if it equals `expected`.
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            let _ = self.advance();
            true
        } else {
            false
        }
    }

    /// Returns true once all characters are consumed.
    #[must_use]
    pub fn at_end(&self) -> bool { self.pos >= self.chars.len() }

    /// Current character offset.
    #[must_use]
    pub const fn pos(&self) -> usize { self.pos }

    /// Current position as a [`Position`].
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.line, self.column, self.pos)
    }

    /// Extracts the source text between two character offsets.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start.min(self.chars.len())..end.min(self.chars.len())].iter().collect()
    }

    /// Extracts the source text from `start` to the current position.
    #[must_use]
    pub fn slice_from(&self, start: usize) -> String { self.slice(start, self.pos) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(source: &[u8]) -> Cursor {
        let (cursor, errors) = Cursor::new(source, 1, 1);
        assert!(errors.is_empty(), "unexpected decode errors: {errors:?}");
        cursor
    }

    #[test]
    fn advance_moves_forward() {
        let mut c = cursor(b"abc");
        assert_eq!(c.peek(), Some('a'));
        assert_eq!(c.advance(), Some('a'));
        assert_eq!(c.peek(), Some('b'));
        assert_eq!(c.pos(), 1);
    }

    #[test]
    fn peek_n_looks_ahead_by_characters() {
        let c = cursor("aé🦀b".as_bytes());
        assert_eq!(c.peek_n(0), Some('a'));
        assert_eq!(c.peek_n(1), Some('é'));
        assert_eq!(c.peek_n(2), Some('🦀'));
        assert_eq!(c.peek_n(3), Some('b'));
        assert_eq!(c.peek_n(4), None);
    }

    #[test]
    fn columns_count_characters_not_bytes() {
        let mut c = cursor("é🦀x".as_bytes());
        let _ = c.advance();
        let _ = c.advance();
        assert_eq!(c.position().column, 3);
        assert_eq!(c.position().offset, 2);
    }

    #[test]
    fn newline_resets_column_and_bumps_line() {
        let mut c = cursor(b"a\nb");
        let _ = c.advance();
        let _ = c.advance();
        let position = c.position();
        assert_eq!(position.line, 2);
        assert_eq!(position.column, 1);
    }

    #[test]
    fn crlf_collapses_to_lf() {
        let c = cursor(b"a\r\nb");
        assert_eq!(c.slice(0, 3), "a\nb");
    }

    #[test]
    fn lone_cr_becomes_space() {
        let c = cursor(b"a\rb");
        assert_eq!(c.slice(0, 3), "a b");
    }

    #[test]
    fn malformed_bytes_are_skipped_and_reported() {
        let (c, errors) = Cursor::new(b"ab\xffcd", 1, 1);
        assert_eq!(c.slice(0, 4), "abcd");
        assert_eq!(errors.len(), 1);
        match &errors[0] {
            LexError::InvalidEncoding { byte, line, column } => {
                assert_eq!(*byte, 0xff);
                assert_eq!(*line, 1);
                assert_eq!(*column, 3);
            }
            other => panic!("expected InvalidEncoding, got {other:?}"),
        }
    }

    #[test]
    fn start_position_offsets_fragments() {
        let (mut c, _) = Cursor::new(b"x\ny", 10, 5);
        assert_eq!(c.position().line, 10);
        assert_eq!(c.position().column, 5);
        let _ = c.advance();
        let _ = c.advance();
        assert_eq!(c.position().line, 11);
        assert_eq!(c.position().column, 5);
    }

    #[test]
    fn empty_source_is_immediately_at_end() {
        let c = cursor(b"");
        assert!(c.at_end());
        assert_eq!(c.peek(), None);
    }
}
