//! Durable storage for every source lexed during a session.
//!
//! The main file and every generated fragment are registered here before
//! they are parsed. Entries are append-only: once registered, a source's
//! text, lines and tokens are never mutated or dropped until the whole
//! [`SourceMap`] goes away, so any [`Span`](crate::Span) or
//! [`SourcePosition`] handed out earlier keeps resolving.

use std::ops::Index;

use metaform_foundation::{SourceId, SourcePosition};

use crate::lexer::Lexer;
use crate::token::Token;

/// Where a registered source came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceOrigin {
    /// Text read from a file by the driver.
    File,
    /// Text synthesized by a meta-function.
    Generated,
}

/// One logical source line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based line number within its source.
    pub number: u32,
    /// The line text without its terminating newline.
    pub text: String,
}

/// A registered source with its reconstructed lines and token buffer.
#[derive(Clone, Debug)]
pub struct SourceFile {
    id: SourceId,
    name: String,
    origin: SourceOrigin,
    text: String,
    lines: Vec<SourceLine>,
    tokens: Vec<Token>,
}

impl SourceFile {
    /// Returns this source's id.
    #[must_use]
    pub fn id(&self) -> SourceId {
        self.id
    }

    /// Returns the display name of this source.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns where this source came from.
    #[must_use]
    pub fn origin(&self) -> SourceOrigin {
        self.origin
    }

    /// Returns the full source text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the logical lines of this source.
    #[must_use]
    pub fn lines(&self) -> &[SourceLine] {
        &self.lines
    }

    /// Returns the token buffer (including trivia, ending in `Eof`).
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the text of a 1-based line.
    #[must_use]
    pub fn line(&self, number: u32) -> Option<&str> {
        let index = usize::try_from(number.checked_sub(1)?).ok()?;
        self.lines.get(index).map(|l| l.text.as_str())
    }
}

/// Append-only registry of every source lexed in a session.
#[derive(Clone, Debug, Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    /// Creates an empty source map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a file read by the driver and lexes it.
    pub fn add_file(&mut self, name: impl Into<String>, text: impl Into<String>) -> SourceId {
        self.register(name.into(), SourceOrigin::File, text.into())
    }

    /// Registers a generated fragment and lexes it.
    pub fn add_generated(&mut self, name: impl Into<String>, text: impl Into<String>) -> SourceId {
        self.register(name.into(), SourceOrigin::Generated, text.into())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn register(&mut self, name: String, origin: SourceOrigin, text: String) -> SourceId {
        let id = SourceId::new(self.files.len() as u32);
        let lines = split_lines(&text);
        let tokens = Lexer::tokenize_all(&text, id);
        self.files.push(SourceFile {
            id,
            name,
            origin,
            text,
            lines,
            tokens,
        });
        id
    }

    /// Returns a registered source.
    #[must_use]
    pub fn get(&self, id: SourceId) -> Option<&SourceFile> {
        usize::try_from(id.index())
            .ok()
            .and_then(|i| self.files.get(i))
    }

    /// Returns the text of the line a position points at.
    #[must_use]
    pub fn line_text(&self, position: SourcePosition) -> Option<&str> {
        self.get(position.source)?.line(position.line)
    }

    /// Returns the number of registered sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Returns how many generated fragments have been registered.
    #[must_use]
    pub fn generated_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.origin == SourceOrigin::Generated)
            .count()
    }

    /// Returns an iterator over all registered sources in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter()
    }
}

impl Index<SourceId> for SourceMap {
    type Output = SourceFile;

    /// # Panics
    /// Panics if `id` was not issued by this map.
    fn index(&self, id: SourceId) -> &SourceFile {
        &self.files[id.index() as usize]
    }
}

/// Splits text into logical lines on `'\n'`.
///
/// A fragment without line breaks is a single line; a trailing newline
/// does not produce an extra empty line.
#[must_use]
pub fn split_lines(text: &str) -> Vec<SourceLine> {
    text.lines()
        .zip(1u32..)
        .map(|(line, number)| SourceLine {
            number,
            text: line.to_string(),
        })
        .collect()
}
