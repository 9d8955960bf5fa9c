//! Metaform - Compile-time reflection and meta-functions
//!
//! This crate re-exports all layers of the metaform system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: metaform_reflect    - Session, compiler services, views, dispatch, interface
//! Layer 1: metaform_syntax     - Lexer, source map, parser, declaration arena, printer
//! Layer 0: metaform_foundation - Errors, source positions, diagnostics
//! ```

pub use metaform_foundation as foundation;
pub use metaform_reflect as reflect;
pub use metaform_syntax as syntax;
