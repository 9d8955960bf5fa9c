//! Source location tracking.
//!
//! `Span` tracks the position of tokens and declarations in a registered
//! source for error reporting. Every span names its [`SourceId`], so spans
//! into generated fragments stay meaningful after the fragment was parsed.

use metaform_foundation::{SourceId, SourcePosition};

/// A span of source text.
///
/// Tracks byte offsets and line/column positions for error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Span {
    /// The source this span points into.
    pub source: SourceId,
    /// Byte offset where this span starts.
    pub start: usize,
    /// Byte offset where this span ends (exclusive).
    pub end: usize,
    /// 1-based line number where this span starts.
    pub line: u32,
    /// 1-based column number where this span starts.
    pub column: u32,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(source: SourceId, start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            source,
            start,
            end,
            line,
            column,
        }
    }

    /// Creates a span at the start of the given source.
    #[must_use]
    pub const fn at_start(source: SourceId) -> Self {
        Self {
            source,
            start: 0,
            end: 0,
            line: 1,
            column: 1,
        }
    }

    /// Creates a span covering the range from this span to another.
    #[must_use]
    pub fn to(self, other: Self) -> Self {
        Self {
            source: self.source,
            start: self.start,
            end: other.end,
            line: self.line,
            column: self.column,
        }
    }

    /// Returns the length of this span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if this span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the text this span covers in the given source.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    /// Returns the line/column position where this span starts.
    #[must_use]
    pub const fn position(&self) -> SourcePosition {
        SourcePosition::new(self.source, self.line, self.column)
    }
}
