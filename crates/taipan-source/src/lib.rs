//! Source file handling and position tracking for the Taipan compiler.
//!
//! This crate provides the fundamental types for locating language constructs
//! in Taipan source code: files, positions, and spans. Scanner tokens and
//! diagnostics both carry these types, so they live in a leaf crate with no
//! compiler dependencies.
//!
//! Columns are character-counted (a multi-byte character advances the column
//! by one), lines are 1-indexed and advance on `\n` only. See [`types`] for
//! the full conventions.

pub mod types;
