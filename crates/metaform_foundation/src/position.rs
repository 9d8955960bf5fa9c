//! Source identifiers and positions.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a registered source: a parsed file or a generated fragment.
///
/// Sources are never unregistered, so an id stays valid for the whole
/// compilation session.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceId(u32);

impl SourceId {
    /// Sentinel for positions that do not point into any registered source.
    pub const UNKNOWN: SourceId = SourceId(u32::MAX);

    /// Creates a source id from a raw index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index of this source.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Returns true if this is the unknown sentinel.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        self.0 == u32::MAX
    }
}

impl Default for SourceId {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl fmt::Debug for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            write!(f, "SourceId(unknown)")
        } else {
            write!(f, "SourceId({})", self.0)
        }
    }
}

/// A 1-based line/column position inside a registered source.
///
/// The default position (line 0, unknown source) is used for diagnostics
/// that have no meaningful location.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourcePosition {
    /// The source this position points into.
    pub source: SourceId,
    /// 1-based line number (0 when unknown).
    pub line: u32,
    /// 1-based column number (0 when unknown).
    pub column: u32,
}

impl SourcePosition {
    /// Creates a new position.
    #[must_use]
    pub const fn new(source: SourceId, line: u32, column: u32) -> Self {
        Self {
            source,
            line,
            column,
        }
    }

    /// Returns true if this position carries a real line number.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        self.line > 0
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "{}:{}", self.line, self.column)
        } else {
            write!(f, "?")
        }
    }
}
