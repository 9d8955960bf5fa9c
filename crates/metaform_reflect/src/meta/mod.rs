//! Built-in meta-functions.
//!
//! These are registered automatically when a registry is created with
//! [`MetaFunctionRegistry::with_builtins`].
//!
//! # Meta-functions
//!
//! - `interface` - Turn a type into a pure abstract base

pub mod interface;

pub use interface::interface;

use crate::registry::MetaFunctionRegistry;

/// Registers all built-in meta-functions into the given registry.
pub fn register_builtins(registry: &mut MetaFunctionRegistry) {
    registry.register("interface", interface);
}
