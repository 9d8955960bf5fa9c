//! The compilation session.
//!
//! A [`Session`] owns everything that must outlive a single meta-function
//! call: the declaration arena, the source map with every generated
//! fragment, and the diagnostic sink. Views and [`CompilerServices`] only
//! borrow the session, so nothing they hand out can dangle.

use std::cell::{Cell, Ref, RefCell, RefMut};

use metaform_foundation::{
    Diagnostic, DiagnosticMark, DiagnosticSink, Error, ErrorContext, ErrorKind, Result,
    SourceId, SourcePosition,
};
use metaform_syntax::{DeclArena, DeclId, Parser, SourceMap, pretty};

use crate::config::SessionConfig;
use crate::dispatch::apply_type_meta_functions;
use crate::registry::MetaFunctionRegistry;
use crate::services::CompilerServices;
use crate::view::{Declaration, TypeDeclaration};

/// State shared by every phase of one compilation.
///
/// Single-threaded: the arena, source map and sink sit behind `RefCell`s
/// so that views can mutate through shared handles. No borrow is held
/// across a call into user code.
#[derive(Debug, Default)]
pub struct Session {
    config: SessionConfig,
    arena: RefCell<DeclArena>,
    sources: RefCell<SourceMap>,
    diagnostics: RefCell<DiagnosticSink>,
    /// Number of arena roots already handed to dispatch.
    dispatched_roots: Cell<usize>,
}

impl Session {
    /// Creates a session with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session with the given configuration.
    #[must_use]
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the session configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns a services handle that remembers the current error count.
    #[must_use]
    pub fn services(&self) -> CompilerServices<'_> {
        CompilerServices::new(self)
    }

    // =========================================================================
    // Driving a compilation
    // =========================================================================

    /// Registers and parses a source file, allocating its declarations.
    ///
    /// # Errors
    /// Returns a parse error (also recorded as a diagnostic) if the file
    /// cannot be parsed. Nothing is allocated in that case.
    pub fn parse_file(&self, name: &str, text: &str) -> Result<Vec<DeclId>> {
        let source = self.sources.borrow_mut().add_file(name, text);

        let parsed = {
            let sources = self.sources.borrow();
            let file = &sources[source];
            Parser::new(file.tokens(), file.text()).parse_all()
        };

        let decls = match parsed {
            Ok(decls) => decls,
            Err(err) => {
                let position = error_position(&err, source);
                self.diagnostics
                    .borrow_mut()
                    .error(position, err.to_string());
                tracing::warn!(target: "metaform::services", file = name, error = %err, "source file rejected");
                return Err(err.with_context(
                    ErrorContext::new()
                        .with_source(name)
                        .with_position(position.line, position.column),
                ));
            }
        };

        let mut arena = self.arena.borrow_mut();
        let ids: Vec<DeclId> = decls.into_iter().map(|d| arena.alloc_root(d)).collect();
        tracing::info!(
            target: "metaform::services",
            file = name,
            declarations = ids.len(),
            "parsed source file"
        );
        Ok(ids)
    }

    /// Dispatches the attached meta-functions of every type parsed since
    /// the previous call, in declaration pre-order.
    ///
    /// Each type is dispatched at most once per session, even when the
    /// walk stopped early. Returns the number of types that had
    /// meta-functions applied. Does nothing when
    /// [`SessionConfig::apply_meta_functions`] is off.
    ///
    /// # Errors
    /// Stops at the first unrecognized meta-function name.
    pub fn run_meta_functions(&self, registry: &MetaFunctionRegistry) -> Result<usize> {
        if !self.config.apply_meta_functions {
            tracing::debug!(target: "metaform::dispatch", "meta-function dispatch disabled");
            return Ok(0);
        }

        let candidates: Vec<DeclId> = {
            let arena = self.arena.borrow();
            let roots = arena.roots();
            let fresh = roots.get(self.dispatched_roots.get()..).unwrap_or(&[]);
            self.dispatched_roots.set(roots.len());
            arena
                .preorder_types_from(fresh)
                .into_iter()
                .filter(|&id| !arena[id].meta_functions.is_empty())
                .collect()
        };

        for &type_id in &candidates {
            apply_type_meta_functions(self, type_id, registry)?;
        }
        Ok(candidates.len())
    }

    /// Parses a source file and runs its meta-functions.
    ///
    /// # Errors
    /// Returns the first parse or dispatch error.
    pub fn compile(
        &self,
        name: &str,
        text: &str,
        registry: &MetaFunctionRegistry,
    ) -> Result<Vec<DeclId>> {
        let ids = self.parse_file(name, text)?;
        self.run_meta_functions(registry)?;
        Ok(ids)
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// Returns a view over a declaration, if the id is valid.
    #[must_use]
    pub fn declaration(&self, id: DeclId) -> Option<Declaration<'_>> {
        self.arena
            .borrow()
            .get(id)
            .is_some()
            .then(|| Declaration::new(id, self.services()))
    }

    /// Returns a type view over a declaration.
    ///
    /// # Errors
    /// Returns an error if the id is invalid or not a type.
    pub fn type_declaration(&self, id: DeclId) -> Result<TypeDeclaration<'_>> {
        self.declaration(id)
            .ok_or_else(|| Error::internal(format!("no declaration with id {id}")))?
            .as_type()
    }

    /// Finds the first type named `name`, in declaration pre-order.
    #[must_use]
    pub fn type_named(&self, name: &str) -> Option<DeclId> {
        self.arena.borrow().type_named(name)
    }

    /// Runs `f` with read access to the declaration arena.
    pub fn with_arena<R>(&self, f: impl FnOnce(&DeclArena) -> R) -> R {
        f(&self.arena.borrow())
    }

    /// Runs `f` with read access to the source map.
    pub fn with_sources<R>(&self, f: impl FnOnce(&SourceMap) -> R) -> R {
        f(&self.sources.borrow())
    }

    /// Renders a declaration back to source text.
    #[must_use]
    pub fn print(&self, id: DeclId) -> String {
        pretty::print_declaration(&self.arena.borrow(), id)
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Returns a snapshot of every diagnostic recorded so far.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().as_slice().to_vec()
    }

    /// Returns the number of diagnostics recorded so far.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    /// Marks the current end of the diagnostic log.
    #[must_use]
    pub fn mark(&self) -> DiagnosticMark {
        self.diagnostics.borrow().mark()
    }

    /// Returns the diagnostics recorded after `mark`.
    #[must_use]
    pub fn errors_since(&self, mark: DiagnosticMark) -> Vec<Diagnostic> {
        self.diagnostics.borrow().since(mark).to_vec()
    }

    /// Returns the display name of a registered source.
    #[must_use]
    pub fn source_name(&self, id: SourceId) -> Option<String> {
        self.sources.borrow().get(id).map(|f| f.name().to_string())
    }

    // =========================================================================
    // Crate-internal access
    // =========================================================================

    pub(crate) fn arena(&self) -> Ref<'_, DeclArena> {
        self.arena.borrow()
    }

    pub(crate) fn arena_mut(&self) -> RefMut<'_, DeclArena> {
        self.arena.borrow_mut()
    }

    pub(crate) fn sources(&self) -> Ref<'_, SourceMap> {
        self.sources.borrow()
    }

    pub(crate) fn sources_mut(&self) -> RefMut<'_, SourceMap> {
        self.sources.borrow_mut()
    }

    pub(crate) fn sink_mut(&self) -> RefMut<'_, DiagnosticSink> {
        self.diagnostics.borrow_mut()
    }
}

/// Maps a parse error to a position inside `source`.
pub(crate) fn error_position(err: &Error, source: SourceId) -> SourcePosition {
    match &err.kind {
        ErrorKind::ParseError { line, column, .. } => SourcePosition::new(source, *line, *column),
        _ => SourcePosition::new(source, 1, 1),
    }
}
