//! Diagnostic reporting system for the Taipan scanner.
//!
//! This module provides the `DiagnosticReporter` struct, which is
//! responsible for collecting, formatting, and emitting diagnostic
//! messages.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::Arc;

use taipan_source::types::{FileID, SourceManager, SourceSpan};

use super::error::{Diagnostic, DiagnosticLevel, LexError};

/// Collects and formats diagnostic messages.
///
/// The `DiagnosticReporter` is responsible for collecting diagnostics
/// during scanning and other compiler stages, and formatting them for
/// presentation to the user in a rustc-like style.
#[derive(Debug, Clone)]
pub struct DiagnosticReporter {
    /// Source manager for looking up snippets
    source_manager: Arc<SourceManager>,
    /// Collection of diagnostics
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticReporter {
    /// Create a new diagnostic reporter with the given source manager.
    #[must_use]
    pub const fn new(source_manager: Arc<SourceManager>) -> Self {
        Self { source_manager, diagnostics: Vec::new() }
    }

    /// Add a diagnostic to the collection.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) { self.diagnostics.push(diagnostic); }

    /// Report a scanner error against the given file.
    pub fn lex_error(&mut self, error: &LexError, file_id: FileID) -> &mut Self {
        self.add_diagnostic(lex_error_to_diagnostic(error, file_id));
        self
    }

    /// Report every error from a finished scan against the given file.
    pub fn lex_errors(&mut self, errors: &[LexError], file_id: FileID) -> &mut Self {
        for error in errors {
            let _ = self.lex_error(error, file_id);
        }
        self
    }

    /// Report a warning.
    pub fn warning(&mut self, message: String, span: SourceSpan) -> &mut Self {
        self.add_diagnostic(Diagnostic::warning(message, span));
        self
    }

    /// Report a note.
    pub fn note(&mut self, message: String, span: SourceSpan) -> &mut Self {
        self.add_diagnostic(Diagnostic::note(message, span));
        self
    }

    /// Check if there are any error-level diagnostics.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level == DiagnosticLevel::Error)
    }

    /// Get the number of diagnostics.
    #[must_use]
    pub const fn len(&self) -> usize { self.diagnostics.len() }

    /// Check if there are no diagnostics.
    #[must_use]
    pub const fn is_empty(&self) -> bool { self.diagnostics.is_empty() }

    /// Get the collected diagnostics.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] { &self.diagnostics }

    /// Clear all diagnostics.
    pub fn clear(&mut self) { self.diagnostics.clear(); }

    /// Format and return all diagnostics as a string.
    #[must_use]
    pub fn emit(&self) -> String {
        let mut output = String::new();

        for diagnostic in &self.diagnostics {
            self.format_diagnostic(&mut output, diagnostic);
        }

        output
    }

    /// Print all diagnostics to the given writer.
    ///
    /// ## Errors
    ///
    /// Returns an I/O error if writing to the output writer fails.
    pub fn print<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for diagnostic in &self.diagnostics {
            let mut formatted = String::new();
            self.format_diagnostic(&mut formatted, diagnostic);
            write!(writer, "{formatted}")?;
        }

        Ok(())
    }

    /// Format a single diagnostic and append it to the given string.
    ///
    /// Produces output that closely resembles rustc's:
    /// ```text
    /// error: unterminated string literal
    ///   --> file.tp:10:5
    ///    |
    /// 10 |     x = "oops
    ///    |         ^
    /// ```
    fn format_diagnostic(&self, output: &mut String, diagnostic: &Diagnostic) {
        let color = diagnostic.level.color_code();
        let reset = DiagnosticLevel::reset_code();

        let Some(file) = self.source_manager.get_file(diagnostic.span.file_id) else {
            // Fall back to a simpler format without a snippet
            let _ = writeln!(output, "{}: {}", diagnostic.level, diagnostic.message);
            return;
        };

        // Header line
        let _ = writeln!(output, "{}{}{}: {}", color, diagnostic.level, reset, diagnostic.message);

        // File location line
        let _ = writeln!(
            output,
            "  --> {}:{}:{}",
            file.name, diagnostic.span.start.line, diagnostic.span.start.column
        );

        // Source line with line number and caret underline
        if let Some(line_text) = file.line(diagnostic.span.start.line) {
            let _ = writeln!(output, "   |");
            let _ = writeln!(output, "{:>3} | {}", diagnostic.span.start.line, line_text);

            let column = diagnostic.span.start.column.max(1);
            let underline_spaces = " ".repeat(column - 1);
            let underline_length = if diagnostic.span.start.line == diagnostic.span.end.line {
                (diagnostic.span.end.column.saturating_sub(diagnostic.span.start.column)).max(1)
            } else {
                line_text.chars().count().saturating_sub(column - 1).max(1)
            };
            let underline = "^".repeat(underline_length);

            let _ = writeln!(output, "   | {underline_spaces}{color}{underline}{reset}");
        }

        // Notes and suggestions
        for note in &diagnostic.notes {
            let _ = writeln!(output, "   = note: {note}");
        }

        for suggestion in &diagnostic.suggestions {
            let _ = writeln!(output, "   = suggestion: {suggestion}");
        }

        output.push('\n');
    }
}

/// Convert a scanner error into a renderable diagnostic.
#[must_use]
pub fn lex_error_to_diagnostic(error: &LexError, file_id: FileID) -> Diagnostic {
    let span = SourceSpan::empty(error.position(), file_id);
    let diagnostic = Diagnostic::error(error.to_string(), span);

    match error {
        LexError::InconsistentIndentation { .. } => diagnostic
            .with_note("Python-style indentation is significant in Taipan".to_string()),
        LexError::InvalidBangAlone { .. } => {
            diagnostic.with_suggestion("Use 'not' for boolean negation".to_string())
        }
        _ => diagnostic,
    }
}
