//! Function declaration view.

use metaform_syntax::{DeclNode, DeclaredThatFunctions, PassingStyle};

use super::Declaration;

/// View over a function declaration.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FunctionDeclaration<'s> {
    base: Declaration<'s>,
}

specialized_view!(FunctionDeclaration, as_function);

impl<'s> FunctionDeclaration<'s> {
    pub(super) fn wrap(base: Declaration<'s>) -> Self {
        Self { base }
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Returns the number of parameters.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.with_node(|n| n.params().len())
    }

    /// Returns the position of the parameter named `name`.
    #[must_use]
    pub fn index_of_parameter_named(&self, name: &str) -> Option<usize> {
        self.with_node(|n| n.index_of_parameter_named(name))
    }

    /// Returns true if a parameter is named `name`.
    #[must_use]
    pub fn has_parameter_named(&self, name: &str) -> bool {
        self.with_node(|n| n.has_parameter_named(name))
    }

    /// Returns true if the parameter named `name` is passed `in`.
    #[must_use]
    pub fn has_in_parameter_named(&self, name: &str) -> bool {
        self.with_node(|n| n.has_parameter_with_pass(name, PassingStyle::In))
    }

    /// Returns true if the parameter named `name` is passed `out`.
    #[must_use]
    pub fn has_out_parameter_named(&self, name: &str) -> bool {
        self.with_node(|n| n.has_parameter_with_pass(name, PassingStyle::Out))
    }

    /// Returns true if the parameter named `name` is passed `move`.
    #[must_use]
    pub fn has_move_parameter_named(&self, name: &str) -> bool {
        self.with_node(|n| n.has_parameter_with_pass(name, PassingStyle::Move))
    }

    // =========================================================================
    // Classification
    // =========================================================================

    /// Returns true for member functions with an explicit `this`.
    #[must_use]
    pub fn is_function_with_this(&self) -> bool {
        self.with_node(DeclNode::is_function_with_this)
    }

    /// Returns true if the function dispatches dynamically.
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        self.with_node(DeclNode::is_virtual_function)
    }

    /// Returns true for constructors.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.with_node(DeclNode::is_constructor)
    }

    /// Returns true for constructors taking `that`.
    #[must_use]
    pub fn is_constructor_with_that(&self) -> bool {
        self.with_node(DeclNode::is_constructor_with_that)
    }

    /// Returns true for copy constructors.
    #[must_use]
    pub fn is_constructor_with_in_that(&self) -> bool {
        self.with_node(DeclNode::is_constructor_with_in_that)
    }

    /// Returns true for move constructors.
    #[must_use]
    pub fn is_constructor_with_move_that(&self) -> bool {
        self.with_node(DeclNode::is_constructor_with_move_that)
    }

    /// Returns true for destructors.
    #[must_use]
    pub fn is_destructor(&self) -> bool {
        self.with_node(DeclNode::is_destructor)
    }

    /// Returns true for assignment operators.
    #[must_use]
    pub fn is_assignment(&self) -> bool {
        self.with_node(DeclNode::is_assignment)
    }

    /// Returns true for assignments taking `that`.
    #[must_use]
    pub fn is_assignment_with_that(&self) -> bool {
        self.with_node(DeclNode::is_assignment_with_that)
    }

    /// Returns true for copy assignments.
    #[must_use]
    pub fn is_assignment_with_in_that(&self) -> bool {
        self.with_node(DeclNode::is_assignment_with_in_that)
    }

    /// Returns true for move assignments.
    #[must_use]
    pub fn is_assignment_with_move_that(&self) -> bool {
        self.with_node(DeclNode::is_assignment_with_move_that)
    }

    /// Returns true for any copy/move constructor or assignment.
    #[must_use]
    pub fn is_copy_or_move(&self) -> bool {
        self.with_node(DeclNode::is_copy_or_move)
    }

    // =========================================================================
    // Mutation and enclosing type
    // =========================================================================

    /// Makes the function virtual; returns false when it has no `this`.
    pub fn make_function_virtual(&self) -> bool {
        self.services()
            .session()
            .arena_mut()
            .make_function_virtual(self.id())
    }

    /// Reports which copy/move functions the enclosing type declares.
    ///
    /// Functions outside a type report none.
    #[must_use]
    pub fn query_declared_that_functions(&self) -> DeclaredThatFunctions {
        let arena = self.services().session().arena();
        match arena[self.id()].parent {
            Some(parent) => arena.find_declared_that_functions(parent),
            None => DeclaredThatFunctions::default(),
        }
    }
}
