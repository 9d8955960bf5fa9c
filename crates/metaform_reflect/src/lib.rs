//! Compile-time reflection and meta-functions for metaform.
//!
//! This crate provides:
//! - [`Session`] - Owner of the arena, source map and diagnostics of one compilation
//! - [`CompilerServices`] - Fragment parsing and `require` for meta-functions
//! - [`Declaration`] and its specialized views - Reflective access to declarations
//! - [`MetaFunctionRegistry`] / [`apply_type_meta_functions`] - Dispatch
//! - [`meta`] - Built-in meta-functions (`interface`)
//! - [`SessionConfig`] - Session configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod dispatch;
pub mod meta;
pub mod registry;
pub mod services;
pub mod session;
pub mod view;

pub use config::SessionConfig;
pub use dispatch::{AppliedMetaFunction, DispatchReport, apply_named_type, apply_type_meta_functions};
pub use registry::{MetaFunction, MetaFunctionRegistry};
pub use services::CompilerServices;
pub use session::Session;
pub use view::{Declaration, FunctionDeclaration, ObjectDeclaration, TypeDeclaration};
