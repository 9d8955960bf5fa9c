//! The lexer/parser bridge handed to meta-functions.

use std::fmt;

use metaform_foundation::SourcePosition;
use metaform_syntax::{DeclSyntax, Parser};

use crate::session::{Session, error_position};

/// Handle to the compiler services of a [`Session`].
///
/// Remembers the diagnostic count at the moment it was created so callers
/// can tell whether an operation reported new errors.
#[derive(Clone, Copy)]
pub struct CompilerServices<'s> {
    session: &'s Session,
    errors_original_size: usize,
}

impl<'s> CompilerServices<'s> {
    /// Creates a services handle over `session`.
    #[must_use]
    pub fn new(session: &'s Session) -> Self {
        Self {
            session,
            errors_original_size: session.error_count(),
        }
    }

    /// Returns the owning session.
    #[must_use]
    pub fn session(&self) -> &'s Session {
        self.session
    }

    /// Returns the diagnostic count when this handle was created.
    #[must_use]
    pub fn errors_original_size(&self) -> usize {
        self.errors_original_size
    }

    /// Returns how many diagnostics were recorded since this handle was created.
    #[must_use]
    pub fn new_error_count(&self) -> usize {
        self.session
            .error_count()
            .saturating_sub(self.errors_original_size)
    }

    /// Records `message` at `position` unless `condition` holds.
    pub fn require(&self, condition: bool, message: &str, position: SourcePosition) {
        if !condition {
            self.session.sink_mut().error(position, message);
        }
    }

    /// Lexes and parses a generated fragment holding exactly one declaration.
    ///
    /// The fragment is registered in the session's source map before it
    /// is lexed and stays there for the rest of the session, so positions
    /// into it remain valid. On failure a diagnostic pointing into the
    /// fragment is recorded and `None` is returned.
    #[must_use]
    pub fn parse_fragment(&self, source: &str) -> Option<DeclSyntax> {
        let config = self.session.config();
        let id = self
            .session
            .sources_mut()
            .add_generated(config.generated_source_name.as_str(), source);

        if config.trace_fragments {
            tracing::debug!(target: "metaform::services", source = ?id, text = source, "parsing generated fragment");
        }

        let parsed = {
            let sources = self.session.sources();
            let file = &sources[id];
            Parser::new(file.tokens(), file.text()).parse_one_declaration()
        };

        match parsed {
            Ok(decl) => {
                tracing::debug!(target: "metaform::services", source = ?id, name = %decl.name, "parsed generated fragment");
                Some(decl)
            }
            Err(err) => {
                tracing::warn!(target: "metaform::services", source = ?id, error = %err, "generated fragment rejected");
                self.session
                    .sink_mut()
                    .error(error_position(&err, id), err.to_string());
                None
            }
        }
    }
}

impl fmt::Debug for CompilerServices<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompilerServices")
            .field("errors_original_size", &self.errors_original_size)
            .finish_non_exhaustive()
    }
}
