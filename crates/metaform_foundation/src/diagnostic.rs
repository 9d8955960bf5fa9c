//! The diagnostic sink.
//!
//! Diagnostics are `(position, message)` records appended in emission
//! order. Records are never removed, so a [`DiagnosticMark`] taken at any
//! point can later answer "how many errors were reported since then".

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::position::SourcePosition;

/// How serious a diagnostic is.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Severity {
    /// A rule violation; processing continues.
    Error,
    /// A hard stop; the operation that reported it was abandoned.
    Fatal,
}

impl Severity {
    /// Returns the lowercase label used when rendering diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Fatal => "fatal error",
        }
    }

    /// Returns true for [`Severity::Fatal`].
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// A single diagnostic record.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostic {
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Where the problem was found.
    pub position: SourcePosition,
    /// Human-readable message. Message texts are stable.
    pub message: String,
}

impl Diagnostic {
    /// Creates an error diagnostic.
    #[must_use]
    pub fn error(position: SourcePosition, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            position,
            message: message.into(),
        }
    }

    /// Creates a fatal diagnostic.
    #[must_use]
    pub fn fatal(position: SourcePosition, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Fatal,
            position,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {}",
            self.position,
            self.severity.as_str(),
            self.message
        )
    }
}

/// A point in the diagnostic log, used to count later additions.
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct DiagnosticMark(usize);

impl DiagnosticMark {
    /// Returns the number of diagnostics that existed when the mark was taken.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0
    }

    /// Returns true if the mark was taken on an empty log.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Append-only, ordered log of diagnostics for one compilation session.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticSink {
    records: Vec<Diagnostic>,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.records.push(diagnostic);
    }

    /// Appends an error diagnostic.
    pub fn error(&mut self, position: SourcePosition, message: impl Into<String>) {
        self.push(Diagnostic::error(position, message));
    }

    /// Appends a fatal diagnostic.
    pub fn fatal(&mut self, position: SourcePosition, message: impl Into<String>) {
        self.push(Diagnostic::fatal(position, message));
    }

    /// Returns the number of diagnostics recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns all diagnostics in emission order.
    #[must_use]
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.records
    }

    /// Returns an iterator over all diagnostics in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.records.iter()
    }

    /// Returns the most recently recorded diagnostic.
    #[must_use]
    pub fn last(&self) -> Option<&Diagnostic> {
        self.records.last()
    }

    /// Takes a mark at the current end of the log.
    #[must_use]
    pub fn mark(&self) -> DiagnosticMark {
        DiagnosticMark(self.records.len())
    }

    /// Returns the diagnostics recorded after `mark` was taken.
    #[must_use]
    pub fn since(&self, mark: DiagnosticMark) -> &[Diagnostic] {
        self.records.get(mark.0..).unwrap_or(&[])
    }

    /// Returns how many diagnostics were recorded after `mark` was taken.
    #[must_use]
    pub fn count_since(&self, mark: DiagnosticMark) -> usize {
        self.since(mark).len()
    }

    /// Returns true if any diagnostic message contains `needle`.
    #[must_use]
    pub fn contains_message(&self, needle: &str) -> bool {
        self.records.iter().any(|d| d.message.contains(needle))
    }

    /// Returns how many diagnostic messages contain `needle`.
    #[must_use]
    pub fn count_matching(&self, needle: &str) -> usize {
        self.records
            .iter()
            .filter(|d| d.message.contains(needle))
            .count()
    }

    /// Returns true if a fatal diagnostic has been recorded.
    #[must_use]
    pub fn has_fatal(&self) -> bool {
        self.records.iter().any(|d| d.severity.is_fatal())
    }
}

impl<'a> IntoIterator for &'a DiagnosticSink {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
