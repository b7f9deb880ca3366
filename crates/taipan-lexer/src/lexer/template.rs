//! Markup mode machine for `view` bodies.
//!
//! While at least one view scope is open, the scanner switches between
//! four mutually exclusive modes: ordinary code, the inside of an open tag
//! (`<` … `>`), literal text between tags, and `{` … `}` interpolations
//! that tokenize as code. A mode stack restores the enclosing mode when a
//! tag or interpolation closes.

use taipan_source::types::Position;

use super::Scanner;
use super::rules::is_identifier_start;
use super::token::{Literal, TokenKind};
use crate::diagnostics::LexError;

/// The scanner's current lexing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Ordinary imperative code
    Code,
    /// Inside an open tag, between `<` (or `</`) and `>` (or `/>`)
    OpenTag,
    /// Literal text between tags
    TagContent,
    /// A `{` … `}` interpolation, tokenized as code
    Interpolation,
}

impl Scanner {
    /// Enters tag scanning at the start of a logical line whose first
    /// significant character is `<`.
    ///
    /// HTML comments are consumed and discarded here; a comment-only line
    /// behaves like a blank line.
    pub(super) fn enter_tag_from_line_start(&mut self) {
        if self.at_html_comment() {
            self.consume_html_comment();
            if self.cursor.peek() == Some('\n') {
                let _ = self.cursor.advance();
                self.at_line_start = true;
            }
            return;
        }

        self.begin_tag();
    }

    /// Emits `TagOpen` or `TagCloseStart` and switches to [`Mode::OpenTag`],
    /// remembering the mode to restore when the tag closes.
    pub(super) fn begin_tag(&mut self) {
        let start = self.cursor.position();
        let _ = self.cursor.advance(); // '<'

        let kind = if self.cursor.match_char('/') {
            TokenKind::TagCloseStart
        } else {
            TokenKind::TagOpen
        };

        self.push_token(kind, start, Literal::None);
        self.mode_stack.push(self.mode);
        self.mode = Mode::OpenTag;
    }

    /// Scans the inside of an open tag: tag/attribute names, `=`, quoted
    /// values, interpolations, and the closing `>` or `/>`.
    ///
    /// Newlines inside an open tag are plain whitespace; a tag joins
    /// physical lines the way brackets do.
    pub(super) fn scan_open_tag(&mut self) {
        loop {
            let Some(c) = self.cursor.peek() else { return };
            let start = self.cursor.position();

            match c {
                ' ' | '\t' | '\u{c}' | '\n' => {
                    let _ = self.cursor.advance();
                }
                '>' => {
                    let _ = self.cursor.advance();
                    self.push_token(TokenKind::TagClose, start, Literal::None);
                    let _ = self.mode_stack.pop();
                    self.mode = Mode::TagContent;
                    return;
                }
                '/' if self.cursor.peek_n(1) == Some('>') => {
                    let _ = self.cursor.advance();
                    let _ = self.cursor.advance();
                    self.push_token(TokenKind::TagSelfClose, start, Literal::None);
                    let origin = self.mode_stack.pop().unwrap_or(Mode::Code);
                    self.mode =
                        if origin == Mode::TagContent { Mode::TagContent } else { Mode::Code };
                    return;
                }
                '{' => {
                    self.begin_interpolation(Mode::OpenTag);
                    return;
                }
                '"' | '\'' => {
                    let _ = self.cursor.advance();
                    self.scan_string_rest(start, c);
                }
                '=' => {
                    let _ = self.cursor.advance();
                    self.push_token(TokenKind::Assign, start, Literal::None);
                }
                c if is_identifier_start(c) => {
                    self.scan_tag_name();
                }
                other => {
                    let _ = self.cursor.advance();
                    self.errors.push(LexError::UnexpectedCharacter {
                        character: other,
                        line: start.line,
                        column: start.column,
                    });
                    self.push_token(TokenKind::Error, start, Literal::None);
                }
            }
        }
    }

    /// Accumulates literal text between tags until markup structure, an
    /// interpolation, or the end of the physical line.
    ///
    /// Text that is pure whitespace is discarded; anything else is
    /// preserved verbatim.
    pub(super) fn scan_tag_content(&mut self) {
        let mut text = String::new();
        let mut start = self.cursor.position();

        loop {
            match self.cursor.peek() {
                None => {
                    self.flush_tag_text(&text, start);
                    return;
                }
                Some('<') => {
                    if self.at_html_comment() {
                        self.flush_tag_text(&text, start);
                        text.clear();
                        self.consume_html_comment();
                        start = self.cursor.position();
                        continue;
                    }
                    self.flush_tag_text(&text, start);
                    self.begin_tag();
                    return;
                }
                Some('{') => {
                    self.flush_tag_text(&text, start);
                    self.begin_interpolation(Mode::TagContent);
                    return;
                }
                Some('\n') => {
                    // The newline itself is layout; code mode handles it.
                    self.flush_tag_text(&text, start);
                    self.mode = Mode::Code;
                    return;
                }
                Some(c) => {
                    text.push(c);
                    let _ = self.cursor.advance();
                }
            }
        }
    }

    /// Emits `InterpolationStart` for the `{` under the cursor and switches
    /// to [`Mode::Interpolation`], restoring `origin` on the matching `}`.
    pub(super) fn begin_interpolation(&mut self, origin: Mode) {
        let start = self.cursor.position();
        let _ = self.cursor.advance(); // '{'
        self.push_token(TokenKind::InterpolationStart, start, Literal::None);
        self.mode_stack.push(origin);
        self.interp_braces.push(0);
        self.mode = Mode::Interpolation;
    }

    /// Handles braces while tokenizing an interpolation. Returns true if
    /// `c` was consumed here.
    pub(super) fn interpolation_token(&mut self, c: char, start: Position) -> bool {
        match c {
            '{' => {
                let _ = self.cursor.advance();
                if let Some(count) = self.interp_braces.last_mut() {
                    *count += 1;
                }
                self.bracket_depth += 1;
                self.push_token(TokenKind::LeftBrace, start, Literal::None);
                true
            }
            '}' => {
                let _ = self.cursor.advance();
                if self.interp_braces.last().copied().unwrap_or(0) == 0 {
                    self.push_token(TokenKind::InterpolationEnd, start, Literal::None);
                    let _ = self.interp_braces.pop();
                    self.mode = self.mode_stack.pop().unwrap_or(Mode::Code);
                } else {
                    if let Some(count) = self.interp_braces.last_mut() {
                        *count -= 1;
                    }
                    self.bracket_depth = self.bracket_depth.saturating_sub(1);
                    self.push_token(TokenKind::RightBrace, start, Literal::None);
                }
                true
            }
            _ => false,
        }
    }

    /// Scans a tag or attribute name. `-` continues a name here, so
    /// `data-id` is one identifier.
    fn scan_tag_name(&mut self) {
        let start = self.cursor.position();
        let _ = self.cursor.advance();

        while self
            .cursor
            .peek()
            .is_some_and(|c| c == '-' || super::rules::is_identifier_continue(c))
        {
            let _ = self.cursor.advance();
        }

        self.push_token(TokenKind::Identifier, start, Literal::None);
    }

    /// Emits the accumulated tag text, unless it is pure whitespace.
    fn flush_tag_text(&mut self, text: &str, start: Position) {
        if text.trim().is_empty() {
            return;
        }
        self.push_token(TokenKind::TagText, start, Literal::Str(text.to_string()));
    }

    /// Returns true if the cursor sits on `<!--`.
    pub(super) fn at_html_comment(&self) -> bool {
        self.cursor.peek() == Some('<')
            && self.cursor.peek_n(1) == Some('!')
            && self.cursor.peek_n(2) == Some('-')
            && self.cursor.peek_n(3) == Some('-')
    }

    /// Consumes `<!-- … -->`, discarding it. An unterminated comment is an
    /// error and consumes the rest of the input.
    pub(super) fn consume_html_comment(&mut self) {
        let start = self.cursor.position();
        for _ in 0..4 {
            let _ = self.cursor.advance(); // '<!--'
        }

        loop {
            if self.cursor.at_end() {
                self.errors.push(LexError::UnterminatedComment {
                    line: start.line,
                    column: start.column,
                });
                return;
            }

            if self.cursor.peek() == Some('-')
                && self.cursor.peek_n(1) == Some('-')
                && self.cursor.peek_n(2) == Some('>')
            {
                let _ = self.cursor.advance();
                let _ = self.cursor.advance();
                let _ = self.cursor.advance();
                return;
            }

            let _ = self.cursor.advance();
        }
    }
}
