//! Error types for the Taipan scanner.
//!
//! This module defines the error types used by the scanner, including:
//! - `DiagnosticLevel`: Severity level of diagnostic messages
//! - `LexError`: Errors that can occur during lexical analysis
//! - `Diagnostic`: A diagnostic message with source location

use std::fmt;

use taipan_source::types::{Position, SourceSpan};
use thiserror::Error;

/// Represents the severity level of a diagnostic message.
///
/// Used to categorize diagnostic messages by their severity, allowing
/// the compiler to present them appropriately to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// An error that prevents successful compilation
    Error,
    /// A warning about potential issues
    Warning,
    /// Additional notes about other diagnostics
    Note,
}

impl DiagnosticLevel {
    /// Returns a string representation of the diagnostic level
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Note => "note",
        }
    }

    /// Returns the ANSI color code for the level
    #[must_use]
    pub const fn color_code(&self) -> &'static str {
        match self {
            Self::Error => "\x1b[31m",   // Red
            Self::Warning => "\x1b[33m", // Yellow
            Self::Note => "\x1b[34m",    // Blue
        }
    }

    /// Returns the ANSI reset code
    #[must_use]
    pub const fn reset_code() -> &'static str { "\x1b[0m" }
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.as_str()) }
}

/// Scanner error type.
///
/// Every variant carries the 1-indexed line and character-counted column of
/// the offending source location. Errors never abort a scan: the scanner
/// records them and continues from the next character.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    /// Character with no possible token interpretation
    #[error("Unexpected character '{character}' at line {line}, column {column}")]
    UnexpectedCharacter {
        /// The offending character
        character: char,
        /// Line number
        line: usize,
        /// Column number
        column: usize,
    },
    /// String literal without a closing quote
    #[error("Unterminated string literal at line {line}, column {column}")]
    UnterminatedString {
        /// Line number
        line: usize,
        /// Column number
        column: usize,
    },
    /// Triple-quoted string without a closing triple quote
    #[error("Unterminated triple-quoted string at line {line}, column {column}")]
    UnterminatedTripleString {
        /// Line number
        line: usize,
        /// Column number
        column: usize,
    },
    /// F-string not closed before newline or end of file
    #[error("Unterminated f-string at line {line}, column {column}")]
    UnterminatedFString {
        /// Line number
        line: usize,
        /// Column number
        column: usize,
    },
    /// HTML comment without a closing `-->`
    #[error("Unterminated comment at line {line}, column {column}")]
    UnterminatedComment {
        /// Line number
        line: usize,
        /// Column number
        column: usize,
    },
    /// Newline inside a single-quoted string
    #[error("String literal crosses a newline at line {line}, column {column}")]
    StringAcrossNewline {
        /// Line number
        line: usize,
        /// Column number
        column: usize,
    },
    /// Dedent to a level never pushed on the indent stack
    #[error(
        "Inconsistent indentation at line {line}, column {column}: expected {expected}, found {found}"
    )]
    InconsistentIndentation {
        /// Indentation width the stack expected
        expected: usize,
        /// Indentation width found on the line
        found: usize,
        /// Line number
        line: usize,
        /// Column number
        column: usize,
    },
    /// Malformed or out-of-range numeric literal
    #[error("Invalid number literal at line {line}, column {column}")]
    InvalidNumber {
        /// Line number
        line: usize,
        /// Column number
        column: usize,
    },
    /// Lone `}` in f-string text outside a replacement field
    #[error("Single '}}' is not allowed in f-string at line {line}, column {column}")]
    UnmatchedFStringBrace {
        /// Line number
        line: usize,
        /// Column number
        column: usize,
    },
    /// `!` with no `=` following it
    #[error("'!' is not a valid token on its own at line {line}, column {column}")]
    InvalidBangAlone {
        /// Line number
        line: usize,
        /// Column number
        column: usize,
    },
    /// Malformed UTF-8 byte sequence in the input
    #[error("Invalid UTF-8 byte 0x{byte:02x} at line {line}, column {column}")]
    InvalidEncoding {
        /// The first malformed byte
        byte: u8,
        /// Line number
        line: usize,
        /// Column number
        column: usize,
    },
}

impl LexError {
    /// Returns the 1-indexed line of the error.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { line, .. }
            | Self::UnterminatedString { line, .. }
            | Self::UnterminatedTripleString { line, .. }
            | Self::UnterminatedFString { line, .. }
            | Self::UnterminatedComment { line, .. }
            | Self::StringAcrossNewline { line, .. }
            | Self::InconsistentIndentation { line, .. }
            | Self::InvalidNumber { line, .. }
            | Self::UnmatchedFStringBrace { line, .. }
            | Self::InvalidBangAlone { line, .. }
            | Self::InvalidEncoding { line, .. } => *line,
        }
    }

    /// Returns the 1-indexed, character-counted column of the error.
    #[must_use]
    pub const fn column(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { column, .. }
            | Self::UnterminatedString { column, .. }
            | Self::UnterminatedTripleString { column, .. }
            | Self::UnterminatedFString { column, .. }
            | Self::UnterminatedComment { column, .. }
            | Self::StringAcrossNewline { column, .. }
            | Self::InconsistentIndentation { column, .. }
            | Self::InvalidNumber { column, .. }
            | Self::UnmatchedFStringBrace { column, .. }
            | Self::InvalidBangAlone { column, .. }
            | Self::InvalidEncoding { column, .. } => *column,
        }
    }

    /// Returns the error location as a zero-width span position.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.line(), self.column(), 0)
    }
}

/// A diagnostic message with source location information.
///
/// Diagnostics represent issues found during scanning or later compiler
/// stages. They include severity level, message, source location, and
/// optional notes and suggestions.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    /// The severity level of this diagnostic
    pub level: DiagnosticLevel,
    /// The message describing the issue
    pub message: String,
    /// Source location of the issue
    pub span: SourceSpan,
    /// Additional explanatory notes
    pub notes: Vec<String>,
    /// Suggested fixes or alternatives
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    #[must_use]
    pub const fn error(message: String, span: SourceSpan) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            message,
            span,
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Create a new warning diagnostic
    #[must_use]
    pub const fn warning(message: String, span: SourceSpan) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            message,
            span,
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Create a new note diagnostic
    #[must_use]
    pub const fn note(message: String, span: SourceSpan) -> Self {
        Self {
            level: DiagnosticLevel::Note,
            message,
            span,
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Add an explanatory note to this diagnostic
    #[must_use]
    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }

    /// Add a suggested fix to this diagnostic
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color = self.level.color_code();
        let reset = DiagnosticLevel::reset_code();

        write!(f, "{}{}{}: {}", color, self.level, reset, self.message)?;
        write!(f, " at {}", self.span)?;

        for note in &self.notes {
            write!(f, "\n  note: {note}")?;
        }

        for suggestion in &self.suggestions {
            write!(f, "\n  suggestion: {suggestion}")?;
        }

        Ok(())
    }
}
