//! # Scanner module for the Taipan programming language.
//!
//! This module is responsible for converting source code into tokens.
//! The scanner is hand-written: a single [`Scanner`] struct owns a
//! decoding cursor, an indent stack, a mode stack for markup scanning,
//! and a context stack for f-strings, and drives everything from one loop.
//!
//! The scanner handles:
//! - Indentation tracking to generate INDENT/DEDENT tokens
//! - Implicit line joining inside brackets and open tags
//! - Markup modes for `view` bodies (tags, text, interpolations)
//! - F-strings with nested replacement fields and format specs
//! - Error reporting and recovery
//!
//! Scanning is a whole-buffer operation: bytes go in, a complete
//! `EndOfFile`-terminated token vector and an error vector come out. After
//! the main scan, a single merge pass rewrites adjacent `is`/`not` and
//! `not`/`in` pairs into compound tokens.

mod cursor;
mod fstring;
mod number;
mod rules;
mod template;
mod token;

pub use cursor::Cursor;
pub use rules::{
    hard_keywords,
    is_identifier_continue,
    is_identifier_start,
    lookup_keyword,
    merge_compound_keywords,
    soft_keywords,
};
pub use token::{Literal, Token, TokenKind};

use taipan_source::types::{FileID, Position, SourceSpan};

use self::fstring::FStringContext;
use self::template::Mode;
use crate::diagnostics::LexError;

/// Tab stops sit at multiples of eight, as in Python.
const TAB_WIDTH: usize = 8;

/// The result of scanning a buffer: every token in source order, ending
/// with `EndOfFile`, and every error in discovery order.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Tokens in source order, `EndOfFile`-terminated
    pub tokens: Vec<Token>,
    /// Errors in discovery order; never aborts the scan
    pub errors: Vec<LexError>,
}

impl ScanResult {
    /// Returns true if any error was recorded.
    #[must_use]
    pub const fn has_errors(&self) -> bool { !self.errors.is_empty() }
}

/// Custom scanner that handles Python's indentation rules and Taipan's
/// markup modes.
#[derive(Debug)]
pub struct Scanner {
    /// Decoding cursor over the source
    pub(crate) cursor: Cursor,
    /// File identifier stamped into every span
    file_id: FileID,
    /// Tokens produced so far
    pub(crate) tokens: Vec<Token>,
    /// Errors recorded so far
    pub(crate) errors: Vec<LexError>,
    /// Indentation management; the bottom entry is always 0
    indent_stack: Vec<usize>,
    /// Open bracket count for implicit line joining
    pub(crate) bracket_depth: usize,
    /// Current lexing mode
    pub(crate) mode: Mode,
    /// Modes to restore when tags and interpolations close
    pub(crate) mode_stack: Vec<Mode>,
    /// Open brace count per open interpolation
    pub(crate) interp_braces: Vec<usize>,
    /// Context stack for open f-strings
    pub(crate) fstrings: Vec<FStringContext>,
    /// Indent-stack depth recorded at each `view` keyword
    view_scopes: Vec<usize>,
    /// Whether currently at the beginning of a line
    at_line_start: bool,
}

impl Scanner {
    /// Creates a scanner for the given source buffer.
    #[must_use]
    pub fn new(source: &[u8], file_id: FileID) -> Self {
        Self::with_start_position(source, file_id, 1, 1)
    }

    /// Creates a scanner whose positions start at `(line, column)`, for
    /// tokenizing a fragment embedded in a larger document.
    #[must_use]
    pub fn with_start_position(
        source: &[u8],
        file_id: FileID,
        line: usize,
        column: usize,
    ) -> Self {
        let (cursor, errors) = Cursor::new(source, line, column);

        Self {
            cursor,
            file_id,
            tokens: Vec::new(),
            errors,
            indent_stack: vec![0], // Start with no indentation
            bracket_depth: 0,
            mode: Mode::Code,
            mode_stack: Vec::new(),
            interp_braces: Vec::new(),
            fstrings: Vec::new(),
            view_scopes: Vec::new(),
            at_line_start: true,
        }
    }

    /// Returns the number of currently open view scopes.
    #[must_use]
    pub fn view_depth(&self) -> usize { self.view_scopes.len() }

    /// Closes the innermost view scope.
    ///
    /// The scanner closes view scopes itself when a dedent returns to the
    /// level that introduced the `view`; this hook exists for callers that
    /// drive fragment scans and signal the end of a view body out-of-band.
    pub fn close_view_scope(&mut self) { let _ = self.view_scopes.pop(); }

    /// Runs the scan to completion.
    ///
    /// Always returns a complete token vector ending in `EndOfFile`, no
    /// matter how many errors were recorded along the way.
    #[must_use]
    pub fn scan(mut self) -> ScanResult {
        while !self.cursor.at_end() {
            if let Some(ctx) = self.fstrings.last() {
                if ctx.in_expr {
                    self.scan_code_token();
                } else if ctx.in_spec {
                    self.scan_format_spec();
                } else {
                    self.scan_fstring_body();
                }
                continue;
            }

            match self.mode {
                Mode::OpenTag => {
                    self.scan_open_tag();
                    continue;
                }
                Mode::TagContent => {
                    self.scan_tag_content();
                    continue;
                }
                Mode::Code | Mode::Interpolation => {}
            }

            if self.at_line_start && self.bracket_depth == 0 {
                self.handle_line_start();
                continue;
            }

            self.scan_code_token();
        }

        self.finish();

        let Self { tokens, errors, cursor, .. } = self;
        let tokens = rules::merge_compound_keywords(tokens, &cursor);

        ScanResult { tokens, errors }
    }

    /// Handles indentation at the start of a logical line.
    ///
    /// Blank lines and comment-only lines are skipped without touching the
    /// indent stack and without emitting NEWLINE. Spaces count one column,
    /// tabs advance to the next multiple-of-eight stop, and a form feed
    /// resets the count.
    fn handle_line_start(&mut self) {
        let mut indent = 0usize;

        loop {
            match self.cursor.peek() {
                Some(' ') => {
                    indent += 1;
                    let _ = self.cursor.advance();
                }
                Some('\t') => {
                    indent = (indent / TAB_WIDTH + 1) * TAB_WIDTH;
                    let _ = self.cursor.advance();
                }
                Some('\u{c}') => {
                    indent = 0;
                    let _ = self.cursor.advance();
                }
                Some('\n') => {
                    // Blank line: the indent level is preserved.
                    indent = 0;
                    let _ = self.cursor.advance();
                }
                Some('#') => self.skip_comment(),
                _ => break,
            }
        }

        if self.cursor.at_end() {
            return;
        }

        self.compare_indent(indent);
        self.at_line_start = false;

        if self.mode == Mode::Code
            && !self.view_scopes.is_empty()
            && self.cursor.peek() == Some('<')
        {
            self.enter_tag_from_line_start();
        }
    }

    /// Compares a line's indentation against the stack, emitting INDENT or
    /// DEDENT tokens as needed.
    fn compare_indent(&mut self, indent: usize) {
        let current = self.indent_stack.last().copied().unwrap_or(0);

        match indent.cmp(&current) {
            // Indentation increased: push the level and emit INDENT
            std::cmp::Ordering::Greater => {
                self.indent_stack.push(indent);
                self.push_layout(TokenKind::Indent);
            }
            // Indentation decreased: pop levels and emit DEDENT tokens
            std::cmp::Ordering::Less => {
                while self.indent_stack.last().is_some_and(|&level| level > indent) {
                    let _ = self.indent_stack.pop();
                    self.push_layout(TokenKind::Dedent);
                    self.close_view_scopes_below();
                }

                let landed = self.indent_stack.last().copied().unwrap_or(0);
                if landed != indent {
                    let at = self.cursor.position();
                    self.errors.push(LexError::InconsistentIndentation {
                        expected: landed,
                        found: indent,
                        line: at.line,
                        column: at.column,
                    });
                }
            }
            // Same indentation level: no change
            std::cmp::Ordering::Equal => {}
        }
    }

    /// Pops view scopes whose introducing indent level has been dedented
    /// away.
    fn close_view_scopes_below(&mut self) {
        while self
            .view_scopes
            .last()
            .is_some_and(|&depth| self.indent_stack.len() <= depth)
        {
            let _ = self.view_scopes.pop();
        }
    }

    /// Scans one token of ordinary code, skipping inline whitespace and
    /// comments first. Also serves f-string replacement fields and
    /// interpolations, which tokenize as code.
    fn scan_code_token(&mut self) {
        // Inline whitespace, comments, and line endings
        loop {
            match self.cursor.peek() {
                Some(' ' | '\t' | '\u{c}') => {
                    let _ = self.cursor.advance();
                }
                Some('#') => self.skip_comment(),
                Some('\\')
                    if self.fstrings.is_empty()
                        && self.cursor.peek_n(1) == Some('\n') =>
                {
                    // Explicit line continuation
                    let _ = self.cursor.advance();
                    let _ = self.cursor.advance();
                }
                Some('\n') => {
                    if let Some(ctx) = self.fstrings.last() {
                        if ctx.triple {
                            // Whitespace inside a triple-quoted field
                            let _ = self.cursor.advance();
                            continue;
                        }
                        self.unterminated_fstring();
                        return;
                    }

                    if self.bracket_depth > 0 {
                        // Implicit line joining
                        let _ = self.cursor.advance();
                        continue;
                    }

                    let start = self.cursor.position();
                    let _ = self.cursor.advance();
                    self.push_token(TokenKind::Newline, start, Literal::None);
                    self.at_line_start = true;
                    return;
                }
                _ => break,
            }
        }

        let Some(c) = self.cursor.peek() else { return };
        let start = self.cursor.position();

        // F-string replacement-field structure has priority
        if self.fstring_expr_token(c, start) {
            return;
        }

        // Interpolation braces
        if self.fstrings.is_empty()
            && self.mode == Mode::Interpolation
            && self.interpolation_token(c, start)
        {
            return;
        }

        // Numbers, including leading-dot floats
        if c.is_ascii_digit()
            || (c == '.' && self.cursor.peek_n(1).is_some_and(|d| d.is_ascii_digit()))
        {
            self.scan_number();
            return;
        }

        // Identifiers, keywords, and prefixed strings
        if rules::is_identifier_start(c) {
            self.scan_word();
            return;
        }

        if c == '"' || c == '\'' {
            let _ = self.cursor.advance();
            self.scan_string_rest(start, c);
            return;
        }

        // Markup can open mid-expression inside a view body
        if c == '<'
            && self.mode == Mode::Code
            && !self.view_scopes.is_empty()
            && self
                .cursor
                .peek_n(1)
                .is_some_and(|next| next == '/' || rules::is_identifier_start(next))
        {
            self.begin_tag();
            return;
        }

        self.scan_operator(start);
    }

    /// Scans an identifier, resolving keywords and string prefixes.
    fn scan_word(&mut self) {
        let start = self.cursor.position();
        let Some(first) = self.cursor.advance() else { return };

        if matches!(first, 'r' | 'R' | 'f' | 'F') {
            // Single-letter prefix directly on a quote
            if let Some(quote @ ('"' | '\'')) = self.cursor.peek() {
                let _ = self.cursor.advance();
                if matches!(first, 'f' | 'F') {
                    self.scan_fstring_rest(start, quote, false);
                } else {
                    self.scan_string_rest(start, quote);
                }
                return;
            }

            // Two-letter prefix (rf/fr in either case) on a quote
            if let Some(second) = self.cursor.peek() {
                let pair = (matches!(first, 'r' | 'R') && matches!(second, 'f' | 'F'))
                    || (matches!(first, 'f' | 'F') && matches!(second, 'r' | 'R'));

                if pair && matches!(self.cursor.peek_n(1), Some('"' | '\'')) {
                    let _ = self.cursor.advance();
                    let Some(quote) = self.cursor.advance() else { return };
                    self.scan_fstring_rest(start, quote, true);
                    return;
                }
            }
        }

        while self.cursor.peek().is_some_and(rules::is_identifier_continue) {
            let _ = self.cursor.advance();
        }

        let lexeme = self.cursor.slice_from(start.offset);
        let kind = rules::lookup_keyword(&lexeme).unwrap_or(TokenKind::Identifier);

        if kind == TokenKind::View {
            // The view body opens markup scanning until this indent level
            // is dedented away.
            self.view_scopes.push(self.indent_stack.len());
        }

        self.push_token(kind, start, Literal::None);
    }

    /// Scans punctuation and operators with maximal munch.
    fn scan_operator(&mut self, start: Position) {
        let Some(c) = self.cursor.advance() else { return };

        let kind = match c {
            '(' => {
                self.bracket_depth += 1;
                TokenKind::LeftParen
            }
            ')' => {
                self.bracket_depth = self.bracket_depth.saturating_sub(1);
                TokenKind::RightParen
            }
            '[' => {
                self.bracket_depth += 1;
                TokenKind::LeftBracket
            }
            ']' => {
                self.bracket_depth = self.bracket_depth.saturating_sub(1);
                TokenKind::RightBracket
            }
            '{' => {
                self.bracket_depth += 1;
                TokenKind::LeftBrace
            }
            '}' => {
                self.bracket_depth = self.bracket_depth.saturating_sub(1);
                TokenKind::RightBrace
            }
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '~' => TokenKind::Tilde,
            '.' => {
                if self.cursor.peek() == Some('.') && self.cursor.peek_n(1) == Some('.') {
                    let _ = self.cursor.advance();
                    let _ = self.cursor.advance();
                    TokenKind::Ellipsis
                } else {
                    TokenKind::Dot
                }
            }
            '+' => {
                if self.cursor.match_char('=') { TokenKind::PlusEqual } else { TokenKind::Plus }
            }
            '-' => {
                if self.cursor.match_char('=') {
                    TokenKind::MinusEqual
                } else if self.cursor.match_char('>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Minus
                }
            }
            '*' => {
                if self.cursor.match_char('*') {
                    if self.cursor.match_char('=') {
                        TokenKind::DoubleStarEqual
                    } else {
                        TokenKind::DoubleStar
                    }
                } else if self.cursor.match_char('=') {
                    TokenKind::StarEqual
                } else {
                    TokenKind::Star
                }
            }
            '/' => {
                if self.cursor.match_char('/') {
                    if self.cursor.match_char('=') {
                        TokenKind::DoubleSlashEqual
                    } else {
                        TokenKind::DoubleSlash
                    }
                } else if self.cursor.match_char('=') {
                    TokenKind::SlashEqual
                } else {
                    TokenKind::Slash
                }
            }
            '%' => {
                if self.cursor.match_char('=') {
                    TokenKind::PercentEqual
                } else {
                    TokenKind::Percent
                }
            }
            '&' => {
                if self.cursor.match_char('=') {
                    TokenKind::AmpersandEqual
                } else {
                    TokenKind::Ampersand
                }
            }
            '|' => {
                if self.cursor.match_char('=') { TokenKind::PipeEqual } else { TokenKind::Pipe }
            }
            '^' => {
                if self.cursor.match_char('=') { TokenKind::CaretEqual } else { TokenKind::Caret }
            }
            '@' => {
                if self.cursor.match_char('=') { TokenKind::AtEqual } else { TokenKind::At }
            }
            '<' => {
                if self.cursor.match_char('<') {
                    if self.cursor.match_char('=') {
                        TokenKind::LeftShiftEqual
                    } else {
                        TokenKind::LeftShift
                    }
                } else if self.cursor.match_char('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::LessThan
                }
            }
            '>' => {
                if self.cursor.match_char('>') {
                    if self.cursor.match_char('=') {
                        TokenKind::RightShiftEqual
                    } else {
                        TokenKind::RightShift
                    }
                } else if self.cursor.match_char('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::GreaterThan
                }
            }
            '=' => {
                if self.cursor.match_char('=') { TokenKind::Equal } else { TokenKind::Assign }
            }
            ':' => {
                if self.cursor.match_char('=') { TokenKind::ColonEqual } else { TokenKind::Colon }
            }
            '!' => {
                if self.cursor.match_char('=') {
                    TokenKind::NotEqual
                } else {
                    self.errors.push(LexError::InvalidBangAlone {
                        line: start.line,
                        column: start.column,
                    });
                    TokenKind::Error
                }
            }
            other => {
                self.errors.push(LexError::UnexpectedCharacter {
                    character: other,
                    line: start.line,
                    column: start.column,
                });
                TokenKind::Error
            }
        };

        self.push_token(kind, start, Literal::None);
    }

    /// Consumes a `#` comment up to, but not including, the newline.
    fn skip_comment(&mut self) {
        while self.cursor.peek().is_some_and(|c| c != '\n') {
            let _ = self.cursor.advance();
        }
    }

    /// Closes remaining f-strings and indent levels, then emits the final
    /// `EndOfFile` token with a zero-width span.
    fn finish(&mut self) {
        while !self.fstrings.is_empty() {
            self.unterminated_fstring();
        }

        while self.indent_stack.len() > 1 {
            let _ = self.indent_stack.pop();
            self.push_layout(TokenKind::Dedent);
            self.close_view_scopes_below();
        }
        self.view_scopes.clear();

        self.push_layout(TokenKind::EndOfFile);
    }

    /// Pushes a token whose lexeme is the source between `start` and the
    /// current cursor position.
    pub(crate) fn push_token(&mut self, kind: TokenKind, start: Position, literal: Literal) {
        let end = self.cursor.position();
        let lexeme = self.cursor.slice(start.offset, end.offset);
        let span = SourceSpan::new(start, end, self.file_id);
        self.tokens.push(Token::new(kind, lexeme, literal, span));
    }

    /// Pushes a zero-width layout token at the current position.
    fn push_layout(&mut self, kind: TokenKind) {
        let span = SourceSpan::empty(self.cursor.position(), self.file_id);
        self.tokens.push(Token::with_empty_lexeme(kind, span));
    }
}
