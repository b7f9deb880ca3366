//! # Taipan Lexer
//!
//! The scanner for the Taipan programming language, a statically typed
//! language based on Python 3 whose `view` construct embeds HTML markup
//! directly in function bodies.
//!
//! This crate turns a UTF-8 byte buffer into a flat token vector plus a
//! vector of lexical errors. The downstream parser consumes the tokens;
//! scanning never fails, it records errors and keeps going.
//!
//! ## Key Features
//!
//! - **Python-Style Indentation**: INDENT/DEDENT synthesis with a dedent
//!   stack, tab stops, and implicit line joining inside brackets.
//! - **Markup Modes**: `view` bodies switch the scanner between code,
//!   open-tag, tag-content, and interpolation modes.
//! - **F-Strings**: a context-stack sub-scanner handles nested f-strings,
//!   conversions, debug `=`, and format specs with nested fields.
//! - **Error Recovery**: every error is recorded with its position and the
//!   scan continues; the token vector is always `EndOfFile`-terminated.
//!
//! ## Example
//!
//! ```rust
//! use taipan_lexer::lexer::{Scanner, TokenKind};
//! use taipan_source::types::FileID;
//!
//! let source = b"def greet(name):\n    return f\"Hello, {name}!\"\n";
//! let result = Scanner::new(source, FileID::new(1)).scan();
//!
//! assert!(result.errors.is_empty());
//! assert_eq!(result.tokens.first().map(|t| t.kind), Some(TokenKind::Def));
//! assert_eq!(result.tokens.last().map(|t| t.kind), Some(TokenKind::EndOfFile));
//! ```

pub mod diagnostics;
pub mod lexer;
