//! String and f-string scanning.
//!
//! Ordinary strings are scanned in one piece. F-strings are emitted as a
//! token sequence: `FStringStart`, alternating `FStringMiddle` text chunks
//! and `FStringExprStart` … `FStringExprEnd` replacement fields, closed by
//! `FStringEnd`. Replacement fields re-enter the code tokenizer under a
//! pushed [`FStringContext`]; nesting pushes further contexts instead of
//! recursing, so the whole state is a stack that tests can inspect.

use taipan_source::types::Position;

use super::Scanner;
use super::token::{Literal, TokenKind};
use crate::diagnostics::LexError;

/// Per-literal state for an open f-string.
///
/// One context is pushed per textually open f-string literal; a nested
/// f-string inside a replacement field pushes another on top.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FStringContext {
    /// The delimiter character (`'` or `"`)
    pub(super) quote: char,
    /// Whether the literal is triple-quoted
    pub(super) triple: bool,
    /// Whether a raw prefix suppresses backslash skipping in text
    pub(super) raw: bool,
    /// Open `{` count inside the current replacement field (1 = top level)
    pub(super) brace_depth: usize,
    /// Open `(`/`[` count inside the current replacement field
    pub(super) group_depth: usize,
    /// Currently tokenizing a replacement-field expression
    pub(super) in_expr: bool,
    /// Currently inside the format spec of a replacement field
    pub(super) in_spec: bool,
    /// How many f-strings enclose this one (diagnostics only)
    pub(super) nesting: usize,
}

impl Scanner {
    /// Scans the remainder of an ordinary string literal.
    ///
    /// The cursor sits right after the opening quote; `start` marks the
    /// first character of the literal including any prefix. Raw strings
    /// scan identically (a backslash still skips the following character);
    /// the prefix only matters to downstream unescaping and is preserved in
    /// the lexeme.
    pub(super) fn scan_string_rest(&mut self, start: Position, quote: char) {
        let triple =
            self.cursor.peek() == Some(quote) && self.cursor.peek_n(1) == Some(quote);
        if triple {
            let _ = self.cursor.advance();
            let _ = self.cursor.advance();
        }

        let mut content = String::new();

        loop {
            match self.cursor.peek() {
                None => {
                    let error = if triple {
                        LexError::UnterminatedTripleString {
                            line: start.line,
                            column: start.column,
                        }
                    } else {
                        LexError::UnterminatedString { line: start.line, column: start.column }
                    };
                    self.errors.push(error);
                    break;
                }
                Some('\\') => {
                    // Scan-time skipping: the backslash and the next
                    // character pass through uninterpreted.
                    content.push('\\');
                    let _ = self.cursor.advance();
                    if let Some(next) = self.cursor.advance() {
                        content.push(next);
                    }
                }
                Some(c) if c == quote => {
                    if !triple {
                        let _ = self.cursor.advance();
                        break;
                    }
                    if self.cursor.peek_n(1) == Some(quote)
                        && self.cursor.peek_n(2) == Some(quote)
                    {
                        let _ = self.cursor.advance();
                        let _ = self.cursor.advance();
                        let _ = self.cursor.advance();
                        break;
                    }
                    content.push(c);
                    let _ = self.cursor.advance();
                }
                Some('\n') => {
                    if triple {
                        content.push('\n');
                        let _ = self.cursor.advance();
                    } else {
                        // The newline stays unconsumed for layout handling.
                        let at = self.cursor.position();
                        self.errors.push(LexError::StringAcrossNewline {
                            line: at.line,
                            column: at.column,
                        });
                        break;
                    }
                }
                Some(c) => {
                    content.push(c);
                    let _ = self.cursor.advance();
                }
            }
        }

        self.push_token(TokenKind::String, start, Literal::Str(content));
    }

    /// Opens an f-string literal and pushes its context.
    ///
    /// The cursor sits right after the opening quote; `start` marks the
    /// prefix. Emits `FStringStart` whose lexeme is the prefix plus the
    /// quote(s).
    pub(super) fn scan_fstring_rest(&mut self, start: Position, quote: char, raw: bool) {
        let triple =
            self.cursor.peek() == Some(quote) && self.cursor.peek_n(1) == Some(quote);
        if triple {
            let _ = self.cursor.advance();
            let _ = self.cursor.advance();
        }

        self.push_token(TokenKind::FStringStart, start, Literal::None);

        let nesting = self.fstrings.len();
        self.fstrings.push(FStringContext {
            quote,
            triple,
            raw,
            brace_depth: 0,
            group_depth: 0,
            in_expr: false,
            in_spec: false,
            nesting,
        });
    }

    /// Scans literal f-string text up to the next brace, closing quote,
    /// newline, or end of input.
    pub(super) fn scan_fstring_body(&mut self) {
        let Some(ctx) = self.fstrings.last() else { return };
        let (quote, triple, raw) = (ctx.quote, ctx.triple, ctx.raw);

        let mut text = String::new();
        let start = self.cursor.position();

        loop {
            match self.cursor.peek() {
                None => {
                    self.flush_fstring_middle(&text, start);
                    self.unterminated_fstring();
                    return;
                }
                Some('\\') if !raw => {
                    text.push('\\');
                    let _ = self.cursor.advance();
                    if let Some(next) = self.cursor.advance() {
                        text.push(next);
                    }
                }
                Some('{') => {
                    if self.cursor.peek_n(1) == Some('{') {
                        text.push('{');
                        let _ = self.cursor.advance();
                        let _ = self.cursor.advance();
                        continue;
                    }
                    self.flush_fstring_middle(&text, start);
                    self.open_replacement_field();
                    return;
                }
                Some('}') => {
                    if self.cursor.peek_n(1) == Some('}') {
                        text.push('}');
                        let _ = self.cursor.advance();
                        let _ = self.cursor.advance();
                        continue;
                    }
                    let at = self.cursor.position();
                    self.errors.push(LexError::UnmatchedFStringBrace {
                        line: at.line,
                        column: at.column,
                    });
                    let _ = self.cursor.advance();
                }
                Some(c) if c == quote => {
                    if triple
                        && !(self.cursor.peek_n(1) == Some(quote)
                            && self.cursor.peek_n(2) == Some(quote))
                    {
                        // A lone quote inside a triple-quoted body is text.
                        text.push(c);
                        let _ = self.cursor.advance();
                        continue;
                    }
                    self.flush_fstring_middle(&text, start);
                    self.close_fstring(triple);
                    return;
                }
                Some('\n') => {
                    if triple {
                        text.push('\n');
                        let _ = self.cursor.advance();
                    } else {
                        self.flush_fstring_middle(&text, start);
                        self.unterminated_fstring();
                        return;
                    }
                }
                Some(c) => {
                    text.push(c);
                    let _ = self.cursor.advance();
                }
            }
        }
    }

    /// Scans format-spec text: verbatim characters punctuated by nested
    /// replacement fields, ended by the `}` that closes the field.
    pub(super) fn scan_format_spec(&mut self) {
        let Some(ctx) = self.fstrings.last() else { return };
        let (quote, triple) = (ctx.quote, ctx.triple);

        let mut text = String::new();
        let start = self.cursor.position();

        loop {
            match self.cursor.peek() {
                None => {
                    self.flush_fstring_middle(&text, start);
                    self.unterminated_fstring();
                    return;
                }
                Some('{') => {
                    self.flush_fstring_middle(&text, start);
                    self.open_nested_spec_field();
                    return;
                }
                Some('}') => {
                    self.flush_fstring_middle(&text, start);
                    let at = self.cursor.position();
                    let _ = self.cursor.advance();
                    self.push_token(TokenKind::FStringExprEnd, at, Literal::None);
                    if let Some(ctx) = self.fstrings.last_mut() {
                        ctx.brace_depth = 0;
                        ctx.in_expr = false;
                        ctx.in_spec = false;
                    }
                    return;
                }
                Some(c) if c == quote => {
                    if triple
                        && !(self.cursor.peek_n(1) == Some(quote)
                            && self.cursor.peek_n(2) == Some(quote))
                    {
                        text.push(c);
                        let _ = self.cursor.advance();
                        continue;
                    }
                    // The literal ends with its replacement field open.
                    self.flush_fstring_middle(&text, start);
                    self.unterminated_fstring_at_close();
                    self.close_fstring(triple);
                    return;
                }
                Some('\n') => {
                    if triple {
                        text.push('\n');
                        let _ = self.cursor.advance();
                    } else {
                        self.flush_fstring_middle(&text, start);
                        self.unterminated_fstring();
                        return;
                    }
                }
                Some(c) => {
                    text.push(c);
                    let _ = self.cursor.advance();
                }
            }
        }
    }

    /// Handles f-string structure characters while tokenizing a replacement
    /// field expression. Returns true if `c` was consumed here.
    pub(super) fn fstring_expr_token(&mut self, c: char, start: Position) -> bool {
        let Some(ctx) = self.fstrings.last() else { return false };
        if !ctx.in_expr {
            return false;
        }

        let at_top = ctx.brace_depth == 1 && ctx.group_depth == 0;
        let in_spec = ctx.in_spec;

        match c {
            '{' => {
                let _ = self.cursor.advance();
                if let Some(ctx) = self.fstrings.last_mut() {
                    ctx.brace_depth += 1;
                }
                self.push_token(TokenKind::LeftBrace, start, Literal::None);
                true
            }
            '}' => {
                let _ = self.cursor.advance();
                let depth = {
                    let Some(ctx) = self.fstrings.last_mut() else { return true };
                    ctx.brace_depth = ctx.brace_depth.saturating_sub(1);
                    ctx.brace_depth
                };

                if (in_spec && depth == 1) || (!in_spec && depth == 0) {
                    self.push_token(TokenKind::FStringExprEnd, start, Literal::None);
                    if let Some(ctx) = self.fstrings.last_mut() {
                        ctx.in_expr = false;
                    }
                } else {
                    self.push_token(TokenKind::RightBrace, start, Literal::None);
                }
                true
            }
            '(' | '[' => {
                let _ = self.cursor.advance();
                if let Some(ctx) = self.fstrings.last_mut() {
                    ctx.group_depth += 1;
                }
                let kind =
                    if c == '(' { TokenKind::LeftParen } else { TokenKind::LeftBracket };
                self.push_token(kind, start, Literal::None);
                true
            }
            ')' | ']' => {
                let _ = self.cursor.advance();
                if let Some(ctx) = self.fstrings.last_mut() {
                    ctx.group_depth = ctx.group_depth.saturating_sub(1);
                }
                let kind =
                    if c == ')' { TokenKind::RightParen } else { TokenKind::RightBracket };
                self.push_token(kind, start, Literal::None);
                true
            }
            '=' if at_top && !in_spec && self.cursor.peek_n(1) != Some('=') => {
                let _ = self.cursor.advance();
                self.push_token(TokenKind::FStringEqual, start, Literal::None);
                true
            }
            '!' if at_top && !in_spec && self.cursor.peek_n(1) != Some('=') => {
                let _ = self.cursor.advance();
                self.push_token(TokenKind::FStringConversion, start, Literal::None);
                true
            }
            ':' if at_top && !in_spec => {
                let _ = self.cursor.advance();
                self.push_token(TokenKind::Colon, start, Literal::None);
                if let Some(ctx) = self.fstrings.last_mut() {
                    ctx.in_spec = true;
                    ctx.in_expr = false;
                }
                true
            }
            _ => false,
        }
    }

    /// Emits a `FStringMiddle` token for accumulated text, if any.
    ///
    /// The lexeme is the exact source slice (so `{{` stays doubled there);
    /// the literal carries the cooked text with escapes collapsed.
    fn flush_fstring_middle(&mut self, text: &str, start: Position) {
        if self.cursor.pos() > start.offset {
            self.push_token(TokenKind::FStringMiddle, start, Literal::Str(text.to_string()));
        }
    }

    /// Opens a replacement field from body text: emits `FStringExprStart`
    /// and switches the top context into expression tokenization.
    fn open_replacement_field(&mut self) {
        let at = self.cursor.position();
        let _ = self.cursor.advance();
        self.push_token(TokenKind::FStringExprStart, at, Literal::None);
        if let Some(ctx) = self.fstrings.last_mut() {
            ctx.in_expr = true;
            ctx.brace_depth = 1;
            ctx.group_depth = 0;
        }
    }

    /// Opens a nested replacement field from inside a format spec.
    fn open_nested_spec_field(&mut self) {
        let at = self.cursor.position();
        let _ = self.cursor.advance();
        self.push_token(TokenKind::FStringExprStart, at, Literal::None);
        if let Some(ctx) = self.fstrings.last_mut() {
            ctx.brace_depth += 1;
            ctx.in_expr = true;
            ctx.group_depth = 0;
        }
    }

    /// Emits `FStringEnd` for the closing quote(s) and pops the context.
    fn close_fstring(&mut self, triple: bool) {
        let at = self.cursor.position();
        let _ = self.cursor.advance();
        if triple {
            let _ = self.cursor.advance();
            let _ = self.cursor.advance();
        }
        self.push_token(TokenKind::FStringEnd, at, Literal::None);
        let _ = self.fstrings.pop();
    }

    /// Records an unterminated f-string at the current position and pops
    /// the context.
    pub(super) fn unterminated_fstring(&mut self) {
        let at = self.cursor.position();
        self.errors
            .push(LexError::UnterminatedFString { line: at.line, column: at.column });
        let _ = self.fstrings.pop();
    }

    /// Records an unterminated f-string without popping, for the case where
    /// the closing quote arrives while a replacement field is still open.
    fn unterminated_fstring_at_close(&mut self) {
        let at = self.cursor.position();
        self.errors
            .push(LexError::UnterminatedFString { line: at.line, column: at.column });
    }
}
