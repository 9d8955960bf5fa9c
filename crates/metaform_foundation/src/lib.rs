//! Errors, source positions, and diagnostics for metaform.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with context
//! - [`SourceId`] / [`SourcePosition`] - Addresses into registered sources
//! - [`Diagnostic`] / [`DiagnosticSink`] - The append-only diagnostic log

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod diagnostic;
pub mod error;
pub mod position;

pub use diagnostic::{Diagnostic, DiagnosticMark, DiagnosticSink, Severity};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use position::{SourceId, SourcePosition};
