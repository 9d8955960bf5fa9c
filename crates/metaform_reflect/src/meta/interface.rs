//! The `interface` meta-function.
//!
//! Constrains a type to be a pure abstract base: no data, no copy or
//! move, only public virtual functions without bodies, and a virtual
//! destructor (synthesized when missing).
//!
//! Every member is checked and mutated in one pass. Publicity and
//! virtuality are forced even on members that fail a check, so callers
//! must look at the diagnostic count to know whether the result is valid.

use crate::view::TypeDeclaration;

/// Recorded for every data member.
pub const DATA_OBJECT_MESSAGE: &str = "interfaces may not contain data objects";

/// Recorded for every copy/move constructor or assignment.
pub const COPY_OR_MOVE_MESSAGE: &str =
    "interfaces may not copy or move; consider a virtual clone() instead";

/// Recorded for every function with a body.
pub const FUNCTION_BODY_MESSAGE: &str =
    "interface functions must not have a function body; remove the '=' initializer";

/// Recorded for every function that cannot be made public.
pub const NOT_PUBLIC_MESSAGE: &str = "interface functions must be public";

/// Recorded at the type when the destructor cannot be added.
pub const DESTRUCTOR_FAILED_MESSAGE: &str = "could not add pure virtual destructor";

/// The destructor added to types that declare none.
pub const VIRTUAL_DESTRUCTOR: &str = "public operator=: (virtual move this) = { }";

/// Applies the `interface` rules to `t`.
pub fn interface(t: &TypeDeclaration<'_>) {
    let mut has_dtor = false;

    for m in t.get_members() {
        m.require(!m.is_object(), DATA_OBJECT_MESSAGE);

        if let Ok(mf) = m.as_function() {
            mf.require(!mf.is_copy_or_move(), COPY_OR_MOVE_MESSAGE);
            mf.require(!mf.has_initializer(), FUNCTION_BODY_MESSAGE);
            mf.require(mf.make_public(), NOT_PUBLIC_MESSAGE);
            mf.make_function_virtual();
            has_dtor |= mf.is_destructor();
        }
    }

    if !has_dtor {
        let added = t.add_member(VIRTUAL_DESTRUCTOR);
        if added {
            tracing::info!(target: "metaform::interface", type_name = %t.name(), "added virtual destructor");
        }
        t.require(added, DESTRUCTOR_FAILED_MESSAGE);
    }
}
