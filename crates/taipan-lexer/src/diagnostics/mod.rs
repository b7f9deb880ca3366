//! Diagnostics and error reporting module.
//!
//! This module provides types and functions for reporting and formatting
//! diagnostic messages produced by the scanner. It includes:
//!
//! - `DiagnosticLevel`: Enum for categorizing diagnostics by severity
//! - `Diagnostic`: Struct representing a diagnostic message with source location
//! - `DiagnosticReporter`: Struct for collecting and formatting diagnostics
//! - `LexError`: Error records that can occur during scanning
//!
//! Scanning itself never fails: `LexError` records accumulate in the
//! scanner's error vector, and callers hand them to a `DiagnosticReporter`
//! to render rich, rustc-style messages with source snippets.

mod error;
mod reporter;

// Re-export public types
pub use error::{Diagnostic, DiagnosticLevel, LexError};
pub use reporter::{DiagnosticReporter, lex_error_to_diagnostic};
