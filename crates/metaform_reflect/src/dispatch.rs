//! Applies the meta-functions attached to a type.

use metaform_foundation::{Diagnostic, Error, ErrorContext, Result};
use metaform_syntax::DeclId;

use crate::registry::MetaFunctionRegistry;
use crate::session::Session;

/// Diagnostics one meta-function added while it ran.
#[derive(Clone, Debug, PartialEq)]
pub struct AppliedMetaFunction {
    /// The meta-function name as written.
    pub name: String,
    /// Diagnostics recorded during this invocation.
    pub diagnostics: Vec<Diagnostic>,
}

/// Outcome of dispatching one type's meta-functions.
#[derive(Clone, Debug, PartialEq)]
pub struct DispatchReport {
    /// The type the meta-functions were applied to.
    pub type_id: DeclId,
    /// Number of meta-functions attached to the type.
    pub attached: usize,
    /// The meta-functions that ran, in attachment order.
    pub applied: Vec<AppliedMetaFunction>,
}

impl DispatchReport {
    /// Returns true if every attached meta-function was resolved and run.
    ///
    /// This says nothing about the diagnostics those functions recorded.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.applied.len() == self.attached
    }

    /// Returns the number of diagnostics the meta-functions recorded.
    #[must_use]
    pub fn new_errors(&self) -> usize {
        self.applied.iter().map(|a| a.diagnostics.len()).sum()
    }
}

/// Returns the fatal message recorded for an unrecognized name.
#[must_use]
pub fn unrecognized_message(name: &str) -> String {
    format!(
        "(temporary alpha limitation) unrecognized meta function name '{name}' - currently only unqualified 'interface' is supported"
    )
}

/// Runs every meta-function attached to `type_id`, in attachment order.
///
/// A meta-function that records diagnostics does not stop the ones after
/// it. An unrecognized name does: it is recorded as a fatal diagnostic at
/// the name, and the meta-functions after it are not run.
///
/// # Errors
/// Returns `WrongDeclarationKind` (recording nothing) if `type_id` is not
/// a type, and `UnknownMetaFunction` for an unrecognized name.
pub fn apply_type_meta_functions(
    session: &Session,
    type_id: DeclId,
    registry: &MetaFunctionRegistry,
) -> Result<DispatchReport> {
    let view = session.type_declaration(type_id)?;
    let type_name = view.name();
    let metas = view.meta_functions();

    let mut report = DispatchReport {
        type_id,
        attached: metas.len(),
        applied: Vec::with_capacity(metas.len()),
    };

    for meta in metas {
        let function = match registry.resolve(&meta.name) {
            Ok(function) => function,
            Err(err) => {
                let position = meta.span.position();
                session.sink_mut().fatal(position, unrecognized_message(&meta.name));
                tracing::error!(
                    target: "metaform::dispatch",
                    type_name = %type_name,
                    meta = %meta.name,
                    "unrecognized meta function"
                );
                let mut context = ErrorContext::new()
                    .with_position(position.line, position.column)
                    .with_frame(format!("type {type_name}"));
                if let Some(source) = session.source_name(position.source) {
                    context = context.with_source(source);
                }
                return Err(err.with_context(context));
            }
        };

        tracing::debug!(target: "metaform::dispatch", type_name = %type_name, meta = %meta.name, "applying meta function");
        let mark = session.mark();
        function(&view);
        let diagnostics = session.errors_since(mark);
        if !diagnostics.is_empty() {
            tracing::info!(
                target: "metaform::dispatch",
                type_name = %type_name,
                meta = %meta.name,
                diagnostics = diagnostics.len(),
                "meta function reported diagnostics"
            );
        }
        report.applied.push(AppliedMetaFunction {
            name: meta.name,
            diagnostics,
        });
    }

    Ok(report)
}

/// Finds the first type named `type_name` and applies its meta-functions.
///
/// # Errors
/// Returns an internal error if no such type exists; otherwise as
/// [`apply_type_meta_functions`].
pub fn apply_named_type(
    session: &Session,
    type_name: &str,
    registry: &MetaFunctionRegistry,
) -> Result<DispatchReport> {
    let type_id = session
        .type_named(type_name)
        .ok_or_else(|| Error::internal(format!("no type named '{type_name}'")))?;
    apply_type_meta_functions(session, type_id, registry)
}
