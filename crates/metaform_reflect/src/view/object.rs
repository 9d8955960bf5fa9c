//! Object declaration view.

use metaform_syntax::DeclNode;

use super::Declaration;

/// View over a data object declaration.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ObjectDeclaration<'s> {
    base: Declaration<'s>,
}

specialized_view!(ObjectDeclaration, as_object);

impl<'s> ObjectDeclaration<'s> {
    pub(super) fn wrap(base: Declaration<'s>) -> Self {
        Self { base }
    }

    /// Returns true if the object's type was written `const`.
    #[must_use]
    pub fn is_const(&self) -> bool {
        self.with_node(DeclNode::is_const)
    }

    /// Returns true if the type is left to be inferred (`_` or omitted).
    #[must_use]
    pub fn has_wildcard_type(&self) -> bool {
        self.with_node(DeclNode::has_wildcard_type)
    }

    /// Returns the written type, if any, as source text.
    #[must_use]
    pub fn type_text(&self) -> Option<String> {
        self.with_node(|n| n.object_type().map(ToString::to_string))
    }
}
