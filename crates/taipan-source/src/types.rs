//! Type definitions for source code representation.
//!
//! This module defines the core types used for representing source positions,
//! spans, and files in the Taipan compiler. It provides the foundation for
//! accurate source tracking, which is essential for quality error messages
//! and diagnostics.
//!
//! Key types include:
//!
//! - `Position`: A specific location with line, column, and character offset
//! - `Span` and `SourceSpan`: Ranges within source files
//! - `SourceFile`: A complete source file with per-line lookup
//! - `SourceManager`: Manages multiple source files with unique identifiers
//!
//! Conventions: lines and columns are both 1-indexed. Columns count
//! characters, not bytes, so a position's column matches what an editor
//! displays for UTF-8 text. Offsets count characters from the start of the
//! decoded source stream.

use std::fmt;

use rustc_hash::FxHashMap;

/// A unique identifier for a source file.
///
/// `FileID` is a newtype wrapper around `usize` that uniquely identifies
/// a source file within a [`SourceManager`]. IDs are assigned by the
/// manager when files are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileID(usize);

impl FileID {
    /// Creates a new `FileID` with the given value.
    #[must_use]
    pub const fn new(id: usize) -> Self { Self(id) }

    /// Returns the inner value of the `FileID`.
    #[must_use]
    pub const fn value(&self) -> usize { self.0 }
}

impl fmt::Display for FileID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "file:{}", self.0) }
}

/// A position in a source file.
///
/// Positions are 1-indexed for line and column, following common editor
/// conventions. The `offset` is 0-indexed and counts characters from the
/// start of the decoded source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, character-counted)
    pub column: usize,
    /// Character offset from the start of the source (0-indexed)
    pub offset: usize,
}

impl Position {
    /// Creates a new position with the given line, column, and offset.
    #[must_use]
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }

    /// Creates a new position at the start of a file (line 1, column 1).
    #[must_use]
    pub const fn start_of_file() -> Self { Self { line: 1, column: 1, offset: 0 } }

    /// Returns true if this position precedes the other position.
    #[must_use]
    pub const fn precedes(&self, other: &Self) -> bool { self.offset < other.offset }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span in a source file, representing a range between two positions.
///
/// Spans track the location of language constructs in the source code. They
/// are essential for error reporting, as they let the compiler point at
/// specific parts of the source when reporting errors or warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceSpan {
    /// Starting position of the span
    pub start: Position,
    /// Ending position of the span (exclusive)
    pub end: Position,
    /// File identifier
    pub file_id: FileID,
}

impl SourceSpan {
    /// Creates a new span with the given start and end positions and file ID.
    #[must_use]
    pub const fn new(start: Position, end: Position, file_id: FileID) -> Self {
        Self { start, end, file_id }
    }

    /// Creates a zero-width span at the given position.
    ///
    /// Used for synthesized tokens (layout markers, end of file) that do not
    /// correspond to any source text.
    #[must_use]
    pub const fn empty(at: Position, file_id: FileID) -> Self {
        Self { start: at, end: at, file_id }
    }

    /// Returns true if the span covers no characters.
    #[must_use]
    pub const fn is_empty(&self) -> bool { self.start.offset == self.end.offset }

    /// Creates a new span that encompasses both input spans.
    ///
    /// Both spans must be in the same file.
    ///
    /// ## Panics
    ///
    /// Panics if the spans are from different files.
    #[must_use]
    pub fn combine(&self, other: &Self) -> Self {
        assert_eq!(self.file_id, other.file_id, "Cannot combine spans from different files");

        let start = if self.start.precedes(&other.start) { self.start } else { other.start };
        let end = if self.end.precedes(&other.end) { other.end } else { self.end };

        Self { start, end, file_id: self.file_id }
    }
}

impl Default for SourceSpan {
    fn default() -> Self {
        Self { start: Position::new(0, 0, 0), end: Position::new(0, 0, 0), file_id: FileID(0) }
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.file_id, self.start, self.end)
    }
}

/// A simple span that only contains start and end character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start offset
    pub start: usize,
    /// End offset
    pub end: usize,
}

impl Span {
    /// Creates a new simple span with the given start and end offsets.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self { Self { start, end } }

    /// Merges two spans, creating a new span that covers both.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl Default for Span {
    fn default() -> Self { Self::new(0, 0) }
}

impl From<SourceSpan> for Span {
    fn from(source_span: SourceSpan) -> Self {
        Self::new(source_span.start.offset, source_span.end.offset)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A source file representation.
///
/// Contains the content of the file, its name, and the individual lines for
/// efficient snippet lookup when rendering diagnostics.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Identifier of the file
    pub id: FileID,
    /// Name of the file (usually a path)
    pub name: String,
    /// Content of the file
    pub content: String,
    /// Byte offsets of line starts (first entry is always 0)
    line_starts: Vec<usize>,
}

impl SourceFile {
    /// Creates a new source file with the given ID, name, and content.
    #[must_use]
    pub fn new(id: FileID, name: String, content: String) -> Self {
        let line_starts = Self::compute_line_starts(&content);
        Self { id, name, content, line_starts }
    }

    /// Computes the byte offsets of all line starts in the content.
    fn compute_line_starts(content: &str) -> Vec<usize> {
        let mut line_starts = vec![0]; // First line always starts at byte 0

        for (i, c) in content.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }

        line_starts
    }

    /// Returns the number of lines in the file.
    #[must_use]
    pub const fn line_count(&self) -> usize { self.line_starts.len() }

    /// Returns the text of the given line (1-indexed), without its newline.
    ///
    /// Returns `None` if the line number is out of range.
    #[must_use]
    pub fn line(&self, line: usize) -> Option<&str> {
        let idx = line.checked_sub(1)?;
        let start = *self.line_starts.get(idx)?;

        let end = if idx + 1 < self.line_starts.len() {
            self.line_starts[idx + 1] - 1 // Exclude the newline
        } else {
            self.content.len()
        };

        self.content.get(start..end)
    }
}

/// A manager for source files.
///
/// The `SourceManager` keeps track of all source files and assigns unique
/// [`FileID`]s to them. It provides methods for adding files and for looking
/// up files and line text by ID.
#[derive(Debug, Default, Clone)]
pub struct SourceManager {
    /// Map from `FileID` to `SourceFile`
    files: FxHashMap<FileID, SourceFile>,
    /// Next available file ID
    next_id: usize,
}

impl SourceManager {
    /// Creates a new empty `SourceManager`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            files: FxHashMap::default(),
            next_id: 1, // Start from 1, reserve 0 for dummy spans
        }
    }

    /// Adds a new source file and returns its `FileID`.
    pub fn add_file(&mut self, name: String, content: String) -> FileID {
        let id = FileID::new(self.next_id);
        self.next_id += 1;

        let file = SourceFile::new(id, name, content);
        drop(self.files.insert(id, file));

        id
    }

    /// Returns the source file with the given ID, if it exists.
    #[must_use]
    pub fn get_file(&self, id: FileID) -> Option<&SourceFile> { self.files.get(&id) }

    /// Returns the text of a line in the given file, if both exist.
    #[must_use]
    pub fn line(&self, file_id: FileID, line: usize) -> Option<&str> {
        self.get_file(file_id).and_then(|file| file.line(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_lookup_returns_text_without_newline() {
        let file = SourceFile::new(FileID::new(1), "t.tp".to_string(), "ab\ncd\n".to_string());
        assert_eq!(file.line(1), Some("ab"));
        assert_eq!(file.line(2), Some("cd"));
        assert_eq!(file.line(3), Some(""));
        assert_eq!(file.line(4), None);
    }

    #[test]
    fn span_combine_covers_both() {
        let file_id = FileID::new(1);
        let a = SourceSpan::new(Position::new(1, 1, 0), Position::new(1, 3, 2), file_id);
        let b = SourceSpan::new(Position::new(1, 5, 4), Position::new(1, 8, 7), file_id);
        let c = a.combine(&b);
        assert_eq!(c.start.offset, 0);
        assert_eq!(c.end.offset, 7);
    }

    #[test]
    fn empty_span_is_zero_width() {
        let span = SourceSpan::empty(Position::new(3, 1, 10), FileID::new(1));
        assert!(span.is_empty());
        assert_eq!(span.start, span.end);
    }

    #[test]
    fn manager_assigns_increasing_ids() {
        let mut manager = SourceManager::new();
        let a = manager.add_file("a.tp".to_string(), String::new());
        let b = manager.add_file("b.tp".to_string(), String::new());
        assert!(a < b);
        assert!(manager.get_file(a).is_some());
        assert_eq!(manager.line(b, 1), Some(""));
    }
}
