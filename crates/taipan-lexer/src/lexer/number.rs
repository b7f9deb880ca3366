//! Numeric literal scanning.
//!
//! Handles decimal integers, `0b`/`0o`/`0x` radix integers, floats with
//! optional exponent, and imaginary literals with a `j`/`J` suffix.
//! Integers decode to `i64`, floats to `f64`; out-of-range values record
//! an `InvalidNumber` error and the token carries no literal value.
//! Underscore digit separators are not part of the language.

use taipan_source::types::Position;

use super::Scanner;
use super::token::{Literal, TokenKind};
use crate::diagnostics::LexError;

impl Scanner {
    /// Scans a numeric literal.
    ///
    /// The cursor is at the first digit, or at a `.` with a digit directly
    /// behind it (a leading-dot float such as `.5`).
    pub(super) fn scan_number(&mut self) {
        let start = self.cursor.position();

        if self.cursor.peek() == Some('0')
            && matches!(self.cursor.peek_n(1), Some('b' | 'B' | 'o' | 'O' | 'x' | 'X'))
        {
            self.scan_radix_number(start);
            return;
        }

        let mut is_float = false;

        if self.cursor.peek() == Some('.') {
            // Leading-dot float; the dispatcher guarantees a digit follows.
            is_float = true;
            let _ = self.cursor.advance();
            self.eat_digits();
        } else {
            self.eat_digits();

            if self.cursor.peek() == Some('.')
                && self.cursor.peek_n(1).is_some_and(|c| c.is_ascii_digit())
            {
                is_float = true;
                let _ = self.cursor.advance();
                self.eat_digits();
            }
        }

        // An exponent only counts when digits actually follow; `1e` is a
        // number and then an identifier.
        if matches!(self.cursor.peek(), Some('e' | 'E')) {
            let exponent_digits = match self.cursor.peek_n(1) {
                Some('+' | '-') => self.cursor.peek_n(2).is_some_and(|c| c.is_ascii_digit()),
                Some(c) => c.is_ascii_digit(),
                None => false,
            };

            if exponent_digits {
                is_float = true;
                let _ = self.cursor.advance();
                if matches!(self.cursor.peek(), Some('+' | '-')) {
                    let _ = self.cursor.advance();
                }
                self.eat_digits();
            }
        }

        if matches!(self.cursor.peek(), Some('j' | 'J')) {
            let _ = self.cursor.advance();
            let mantissa = self.cursor.slice(start.offset, self.cursor.pos() - 1);
            let literal = match mantissa.parse::<f64>() {
                Ok(value) if value.is_finite() => Literal::Complex(value),
                _ => {
                    self.invalid_number(start);
                    Literal::None
                }
            };
            self.push_token(TokenKind::Number, start, literal);
            return;
        }

        let lexeme = self.cursor.slice_from(start.offset);
        let literal = if is_float {
            match lexeme.parse::<f64>() {
                Ok(value) if value.is_finite() => Literal::Float(value),
                _ => {
                    self.invalid_number(start);
                    Literal::None
                }
            }
        } else {
            // Leading zeros are accepted and carry no meaning.
            match lexeme.parse::<i64>() {
                Ok(value) => Literal::Int(value),
                Err(_) => {
                    self.invalid_number(start);
                    Literal::None
                }
            }
        };

        self.push_token(TokenKind::Number, start, literal);
    }

    /// Scans a `0b`/`0o`/`0x` integer. The cursor is at the leading `0`.
    ///
    /// The whole alphanumeric run after the prefix belongs to the token, so
    /// `0b102` is a single invalid number rather than a number and a
    /// trailing digit.
    fn scan_radix_number(&mut self, start: Position) {
        let _ = self.cursor.advance(); // '0'
        let radix = match self.cursor.advance() {
            Some('b' | 'B') => 2,
            Some('o' | 'O') => 8,
            _ => 16,
        };

        let digits_start = self.cursor.pos();
        while self.cursor.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
            let _ = self.cursor.advance();
        }

        let digits = self.cursor.slice_from(digits_start);
        let literal = if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            self.invalid_number(start);
            Literal::None
        } else {
            match i64::from_str_radix(&digits, radix) {
                Ok(value) => Literal::Int(value),
                Err(_) => {
                    self.invalid_number(start);
                    Literal::None
                }
            }
        };

        self.push_token(TokenKind::Number, start, literal);
    }

    fn eat_digits(&mut self) {
        while self.cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
            let _ = self.cursor.advance();
        }
    }

    fn invalid_number(&mut self, start: Position) {
        self.errors.push(LexError::InvalidNumber { line: start.line, column: start.column });
    }
}
