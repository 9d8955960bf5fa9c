//! Registry of meta-functions.
//!
//! Maps a meta-function name, as written after `@`, to the function that
//! implements it.

use std::collections::HashMap;
use std::fmt;

use metaform_foundation::{Error, Result};

use crate::view::TypeDeclaration;

/// A meta-function: a compile-time transformation of one type.
///
/// Meta-functions report problems through the view's `require` and never
/// fail outright.
pub type MetaFunction = fn(&TypeDeclaration<'_>);

// =============================================================================
// MetaFunctionRegistry
// =============================================================================

/// Registry for storing and resolving meta-functions by name.
#[derive(Clone, Default)]
pub struct MetaFunctionRegistry {
    /// Map from unqualified name to implementation.
    functions: HashMap<String, MetaFunction>,
}

impl MetaFunctionRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in meta-functions pre-registered.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::meta::register_builtins(&mut registry);
        registry
    }

    /// Registers a meta-function, returning any previous one of that name.
    pub fn register(&mut self, name: impl Into<String>, function: MetaFunction) -> Option<MetaFunction> {
        self.functions.insert(name.into(), function)
    }

    /// Resolves a name to its meta-function.
    ///
    /// # Errors
    /// Returns `UnknownMetaFunction` if nothing is registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<MetaFunction> {
        self.functions
            .get(name)
            .copied()
            .ok_or_else(|| Error::unknown_meta_function(name))
    }

    /// Checks if a meta-function is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Returns all registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered meta-functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns true if no meta-functions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Debug for MetaFunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaFunctionRegistry")
            .field("names", &self.names())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
