//! Reflective views over declarations.
//!
//! A view is a small `Copy` value holding a [`DeclId`] and the
//! [`CompilerServices`] it was created with. It never owns the node: every
//! query borrows the session's arena for the duration of that one call.
//!
//! [`Declaration`] exposes the queries every kind shares. The specialized
//! views, [`FunctionDeclaration`], [`ObjectDeclaration`] and
//! [`TypeDeclaration`], dereference to it and are only obtainable through
//! checked down-casts (`as_function`, `as_object`, `as_type`, or
//! `TryFrom`).

/// Implements `Deref`, the checked `TryFrom` and `Debug` for a specialized view.
macro_rules! specialized_view {
    ($view:ident, $cast:ident) => {
        impl<'s> std::ops::Deref for $view<'s> {
            type Target = crate::view::Declaration<'s>;

            fn deref(&self) -> &Self::Target {
                &self.base
            }
        }

        impl<'s> TryFrom<crate::view::Declaration<'s>> for $view<'s> {
            type Error = metaform_foundation::Error;

            fn try_from(decl: crate::view::Declaration<'s>) -> metaform_foundation::Result<Self> {
                decl.$cast()
            }
        }

        impl<'s> From<$view<'s>> for crate::view::Declaration<'s> {
            fn from(view: $view<'s>) -> Self {
                view.base
            }
        }

        impl std::fmt::Debug for $view<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($view)).field(&self.base).finish()
            }
        }
    };
}

mod function;
mod object;
mod type_decl;

pub use function::FunctionDeclaration;
pub use object::ObjectDeclaration;
pub use type_decl::TypeDeclaration;

use std::fmt;

use metaform_foundation::{Error, Result, SourcePosition};
use metaform_syntax::{Access, DeclId, DeclNode};

use crate::services::CompilerServices;

/// View over a declaration of any kind.
#[derive(Clone, Copy)]
pub struct Declaration<'s> {
    id: DeclId,
    services: CompilerServices<'s>,
}

impl<'s> Declaration<'s> {
    /// Creates a view; `id` must have been issued by the session's arena.
    pub(crate) fn new(id: DeclId, services: CompilerServices<'s>) -> Self {
        Self { id, services }
    }

    /// Returns the underlying declaration id.
    #[must_use]
    pub fn id(&self) -> DeclId {
        self.id
    }

    /// Returns the compiler services this view was created with.
    #[must_use]
    pub fn services(&self) -> CompilerServices<'s> {
        self.services
    }

    /// Runs `f` over the underlying node.
    pub(crate) fn with_node<R>(&self, f: impl FnOnce(&DeclNode) -> R) -> R {
        f(&self.services.session().arena()[self.id])
    }

    /// Returns where this declaration starts.
    #[must_use]
    pub fn position(&self) -> SourcePosition {
        self.with_node(|n| n.span.position())
    }

    /// Records `message` at this declaration unless `condition` holds.
    pub fn require(&self, condition: bool, message: &str) {
        self.services.require(condition, message, self.position());
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// Returns true if the declaration is named.
    #[must_use]
    pub fn has_name(&self) -> bool {
        self.with_node(DeclNode::has_name)
    }

    /// Returns true if the declaration is named `name`.
    #[must_use]
    pub fn has_name_eq(&self, name: &str) -> bool {
        self.with_node(|n| n.is_named(name))
    }

    /// Returns the declared name, or an empty string when unnamed.
    #[must_use]
    pub fn name(&self) -> String {
        self.with_node(|n| n.name().unwrap_or_default().to_string())
    }

    /// Returns a short name for the declaration's kind.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        self.with_node(DeclNode::kind_name)
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// Returns true if access is explicitly `public`.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.with_node(DeclNode::is_public)
    }

    /// Returns true if access is explicitly `protected`.
    #[must_use]
    pub fn is_protected(&self) -> bool {
        self.with_node(DeclNode::is_protected)
    }

    /// Returns true if access is explicitly `private`.
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.with_node(DeclNode::is_private)
    }

    /// Returns true if no access specifier applies.
    #[must_use]
    pub fn is_default_access(&self) -> bool {
        self.with_node(DeclNode::is_default_access)
    }

    /// Makes the declaration public; returns whether it now is.
    pub fn make_public(&self) -> bool {
        self.services
            .session()
            .arena_mut()
            .set_access(self.id, Access::Public)
    }

    /// Makes the declaration protected; returns whether it now is.
    pub fn make_protected(&self) -> bool {
        self.services
            .session()
            .arena_mut()
            .set_access(self.id, Access::Protected)
    }

    /// Makes the declaration private; returns whether it now is.
    pub fn make_private(&self) -> bool {
        self.services
            .session()
            .arena_mut()
            .set_access(self.id, Access::Private)
    }

    // =========================================================================
    // Kind and parent
    // =========================================================================

    /// Returns true if an initializer (body or value) is present.
    #[must_use]
    pub fn has_initializer(&self) -> bool {
        self.with_node(DeclNode::has_initializer)
    }

    /// Returns true if the declaration is at global scope.
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.with_node(DeclNode::is_global)
    }

    /// Returns true for functions.
    #[must_use]
    pub fn is_function(&self) -> bool {
        self.with_node(DeclNode::is_function)
    }

    /// Returns true for data objects.
    #[must_use]
    pub fn is_object(&self) -> bool {
        self.with_node(DeclNode::is_object)
    }

    /// Returns true for user-defined types.
    #[must_use]
    pub fn is_type(&self) -> bool {
        self.with_node(DeclNode::is_type)
    }

    /// Returns true for namespaces.
    #[must_use]
    pub fn is_namespace(&self) -> bool {
        self.with_node(DeclNode::is_namespace)
    }

    /// Returns true for aliases.
    #[must_use]
    pub fn is_alias(&self) -> bool {
        self.with_node(DeclNode::is_alias)
    }

    /// Returns true if the lexical parent is a function.
    #[must_use]
    pub fn parent_is_function(&self) -> bool {
        self.services.session().arena().parent_is_function(self.id)
    }

    /// Returns true if the lexical parent is an object.
    #[must_use]
    pub fn parent_is_object(&self) -> bool {
        self.services.session().arena().parent_is_object(self.id)
    }

    /// Returns true if the lexical parent is a type.
    #[must_use]
    pub fn parent_is_type(&self) -> bool {
        self.services.session().arena().parent_is_type(self.id)
    }

    /// Returns true if the lexical parent is a namespace.
    #[must_use]
    pub fn parent_is_namespace(&self) -> bool {
        self.services.session().arena().parent_is_namespace(self.id)
    }

    /// Returns true if the lexical parent is an alias.
    #[must_use]
    pub fn parent_is_alias(&self) -> bool {
        self.services.session().arena().parent_is_alias(self.id)
    }

    /// Returns true if the lexical parent is a polymorphic type.
    #[must_use]
    pub fn parent_is_polymorphic(&self) -> bool {
        self.services.session().arena().parent_is_polymorphic(self.id)
    }

    // =========================================================================
    // Down-casts
    // =========================================================================

    fn expect_kind(&self, expected: &'static str, matches: bool) -> Result<()> {
        if matches {
            Ok(())
        } else {
            Err(Error::wrong_declaration_kind(expected, self.kind_name()))
        }
    }

    /// Re-wraps this view as a function view.
    ///
    /// # Errors
    /// Returns `WrongDeclarationKind` if this is not a function.
    pub fn as_function(&self) -> Result<FunctionDeclaration<'s>> {
        self.expect_kind("function", self.is_function())?;
        Ok(FunctionDeclaration::wrap(*self))
    }

    /// Re-wraps this view as an object view.
    ///
    /// # Errors
    /// Returns `WrongDeclarationKind` if this is not an object.
    pub fn as_object(&self) -> Result<ObjectDeclaration<'s>> {
        self.expect_kind("object", self.is_object())?;
        Ok(ObjectDeclaration::wrap(*self))
    }

    /// Re-wraps this view as a type view.
    ///
    /// # Errors
    /// Returns `WrongDeclarationKind` if this is not a type.
    pub fn as_type(&self) -> Result<TypeDeclaration<'s>> {
        self.expect_kind("type", self.is_type())?;
        Ok(TypeDeclaration::wrap(*self))
    }
}

impl fmt::Debug for Declaration<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Declaration")
            .field("id", &self.id)
            .field("kind", &self.kind_name())
            .field("name", &self.name())
            .finish()
    }
}

impl PartialEq for Declaration<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::eq(self.services.session(), other.services.session())
    }
}

impl Eq for Declaration<'_> {}
