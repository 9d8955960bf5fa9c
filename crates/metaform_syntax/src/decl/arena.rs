//! Arena owning every declaration of a compilation.

use std::ops::Index;

use crate::ast::{Access, DeclSyntax, DeclSyntaxKind, ThisSpecifier};

use super::node::{
    AliasInfo, DeclId, DeclKind, DeclNode, DeclaredThatFunctions, FunctionSig, MemberFilter,
    NamespaceInfo, ObjectInfo, TypeInfo,
};

/// Owns declaration nodes addressed by [`DeclId`].
///
/// Nodes are only ever appended; an id stays valid for the arena's
/// whole lifetime.
#[derive(Clone, Debug, Default)]
pub struct DeclArena {
    nodes: Vec<DeclNode>,
    roots: Vec<DeclId>,
}

impl DeclArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Allocation
    // =========================================================================

    /// Allocates a top-level declaration tree and records it as a root.
    pub fn alloc_root(&mut self, syntax: DeclSyntax) -> DeclId {
        let id = self.alloc_tree(syntax, None);
        self.roots.push(id);
        id
    }

    /// Allocates a declaration tree below `parent`.
    ///
    /// Members are allocated after their enclosing declaration, so ids
    /// follow pre-order. This does not link the tree into the parent's
    /// member list; see [`DeclArena::add_type_member`].
    pub fn alloc_tree(&mut self, syntax: DeclSyntax, parent: Option<DeclId>) -> DeclId {
        let DeclSyntax {
            name,
            access,
            meta_functions,
            kind,
            initializer,
            span,
        } = syntax;

        let (kind, members) = match kind {
            DeclSyntaxKind::Function { params, returns } => {
                (DeclKind::Function(FunctionSig { params, returns }), Vec::new())
            }
            DeclSyntaxKind::Object { ty } => (DeclKind::Object(ObjectInfo { ty }), Vec::new()),
            DeclSyntaxKind::Type { members } => (DeclKind::Type(TypeInfo::default()), members),
            DeclSyntaxKind::Namespace { members } => {
                (DeclKind::Namespace(NamespaceInfo::default()), members)
            }
            DeclSyntaxKind::Alias { of, target, ty } => {
                (DeclKind::Alias(AliasInfo { of, target, ty }), Vec::new())
            }
        };

        let id = self.next_id();
        self.nodes.push(DeclNode {
            name: (!name.is_empty()).then_some(name),
            access,
            parent,
            kind,
            initializer,
            meta_functions,
            span,
        });

        let children: Vec<DeclId> = members
            .into_iter()
            .map(|member| self.alloc_tree(member, Some(id)))
            .collect();
        if let Some(list) = self.member_list_mut(id) {
            *list = children;
        }
        id
    }

    /// Appends a detached declaration tree to the end of a type's members.
    ///
    /// Returns `None`, allocating nothing, when `type_id` is not a type.
    pub fn add_type_member(&mut self, type_id: DeclId, syntax: DeclSyntax) -> Option<DeclId> {
        if !self.get(type_id)?.is_type() {
            return None;
        }
        let child = self.alloc_tree(syntax, Some(type_id));
        self.member_list_mut(type_id)?.push(child);
        Some(child)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn next_id(&self) -> DeclId {
        DeclId::new(self.nodes.len() as u32)
    }

    fn member_list_mut(&mut self, id: DeclId) -> Option<&mut Vec<DeclId>> {
        match &mut self.nodes.get_mut(id.index() as usize)?.kind {
            DeclKind::Type(info) => Some(&mut info.members),
            DeclKind::Namespace(info) => Some(&mut info.members),
            _ => None,
        }
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Returns a node by id.
    #[must_use]
    pub fn get(&self, id: DeclId) -> Option<&DeclNode> {
        self.nodes.get(id.index() as usize)
    }

    /// Returns the top-level declarations in allocation order.
    #[must_use]
    pub fn roots(&self) -> &[DeclId] {
        &self.roots
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over every node with its id, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &DeclNode)> {
        (0u32..).zip(&self.nodes).map(|(i, n)| (DeclId::new(i), n))
    }

    /// Returns the lexical parent of a node.
    #[must_use]
    pub fn parent(&self, id: DeclId) -> Option<&DeclNode> {
        self.get(self.get(id)?.parent?)
    }

    /// Returns a snapshot of a type's immediate members passing `filter`.
    ///
    /// Returns an empty list for nodes that are not types.
    #[must_use]
    pub fn type_scope_declarations(&self, type_id: DeclId, filter: MemberFilter) -> Vec<DeclId> {
        match self.get(type_id) {
            Some(node) if node.is_type() => node
                .members()
                .iter()
                .copied()
                .filter(|&m| filter.matches(&self[m].kind))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Returns every type declaration in declaration pre-order.
    #[must_use]
    pub fn preorder_types(&self) -> Vec<DeclId> {
        self.preorder_types_from(&self.roots)
    }

    /// Returns the type declarations at or below `roots`, in pre-order.
    ///
    /// Ids this arena did not issue are skipped.
    #[must_use]
    pub fn preorder_types_from(&self, roots: &[DeclId]) -> Vec<DeclId> {
        let mut out = Vec::new();
        let mut stack: Vec<DeclId> = roots
            .iter()
            .rev()
            .copied()
            .filter(|&id| self.get(id).is_some())
            .collect();
        while let Some(id) = stack.pop() {
            let node = &self[id];
            if node.is_type() {
                out.push(id);
            }
            stack.extend(node.members().iter().rev().copied());
        }
        out
    }

    /// Finds the first type named `name` in pre-order.
    #[must_use]
    pub fn type_named(&self, name: &str) -> Option<DeclId> {
        self.preorder_types()
            .into_iter()
            .find(|&id| self[id].is_named(name))
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Sets the access level of a type member.
    ///
    /// Only a declaration directly inside a type, other than a namespace,
    /// admits access control, and only default access can be changed.
    /// Returns whether the node now has access `access`.
    pub fn set_access(&mut self, id: DeclId, access: Access) -> bool {
        let inside_type = self.parent(id).is_some_and(DeclNode::is_type);
        let Some(node) = self.nodes.get_mut(id.index() as usize) else {
            return false;
        };
        if !inside_type || node.is_namespace() {
            return false;
        }
        if node.access == Access::Default {
            node.access = access;
        }
        node.access == access
    }

    /// Marks a member function's `this` parameter `virtual`.
    ///
    /// Returns true if the function is virtual afterwards; false if it has
    /// no `this` parameter (or is not a function).
    pub fn make_function_virtual(&mut self, id: DeclId) -> bool {
        let Some(DeclNode {
            kind: DeclKind::Function(sig),
            ..
        }) = self.nodes.get_mut(id.index() as usize)
        else {
            return false;
        };
        match sig.params.first_mut() {
            Some(this) if this.is_this() => {
                if !this.specifier.is_some_and(ThisSpecifier::is_virtual) {
                    this.specifier = Some(ThisSpecifier::Virtual);
                }
                true
            }
            _ => false,
        }
    }

    // =========================================================================
    // Type queries
    // =========================================================================

    /// Returns true if a type has a virtual member function, or a base
    /// subobject (member object named `this`) of a polymorphic type.
    #[must_use]
    pub fn is_polymorphic(&self, type_id: DeclId) -> bool {
        self.is_polymorphic_guarded(type_id, &mut Vec::new())
    }

    fn is_polymorphic_guarded(&self, type_id: DeclId, visiting: &mut Vec<DeclId>) -> bool {
        let Some(node) = self.get(type_id).filter(|n| n.is_type()) else {
            return false;
        };
        if visiting.contains(&type_id) {
            return false;
        }
        visiting.push(type_id);

        node.members().iter().any(|&m| {
            let member = &self[m];
            if member.is_virtual_function() {
                return true;
            }
            member.is_object()
                && member.is_named("this")
                && member
                    .object_type()
                    .and_then(|ty| self.type_named(&ty.text))
                    .is_some_and(|base| self.is_polymorphic_guarded(base, visiting))
        })
    }

    /// Scans a type's member functions for copy/move constructors and
    /// assignments.
    #[must_use]
    pub fn find_declared_that_functions(&self, type_id: DeclId) -> DeclaredThatFunctions {
        let mut found = DeclaredThatFunctions::default();
        for id in self.type_scope_declarations(type_id, MemberFilter::Functions) {
            let f = &self[id];
            found.out_this_in_that |= f.is_constructor_with_in_that();
            found.out_this_move_that |= f.is_constructor_with_move_that();
            found.inout_this_in_that |= f.is_assignment_with_in_that();
            found.inout_this_move_that |= f.is_assignment_with_move_that();
        }
        found
    }

    // =========================================================================
    // Parent queries
    // =========================================================================

    /// Returns true if the lexical parent is a function.
    ///
    /// Function bodies and object initializers are kept as text, so the
    /// parser never produces a declaration nested in a function, object
    /// or alias. For parsed code this and the object and alias queries
    /// below are therefore always false.
    #[must_use]
    pub fn parent_is_function(&self, id: DeclId) -> bool {
        self.parent(id).is_some_and(DeclNode::is_function)
    }

    /// Returns true if the lexical parent is an object.
    #[must_use]
    pub fn parent_is_object(&self, id: DeclId) -> bool {
        self.parent(id).is_some_and(DeclNode::is_object)
    }

    /// Returns true if the lexical parent is a type.
    #[must_use]
    pub fn parent_is_type(&self, id: DeclId) -> bool {
        self.parent(id).is_some_and(DeclNode::is_type)
    }

    /// Returns true if the lexical parent is a namespace.
    #[must_use]
    pub fn parent_is_namespace(&self, id: DeclId) -> bool {
        self.parent(id).is_some_and(DeclNode::is_namespace)
    }

    /// Returns true if the lexical parent is an alias.
    #[must_use]
    pub fn parent_is_alias(&self, id: DeclId) -> bool {
        self.parent(id).is_some_and(DeclNode::is_alias)
    }

    /// Returns true if the lexical parent is a polymorphic type.
    #[must_use]
    pub fn parent_is_polymorphic(&self, id: DeclId) -> bool {
        self.get(id)
            .and_then(|n| n.parent)
            .is_some_and(|p| self.is_polymorphic(p))
    }
}

impl Index<DeclId> for DeclArena {
    type Output = DeclNode;

    /// # Panics
    /// Panics if `id` was not issued by this arena.
    fn index(&self, id: DeclId) -> &DeclNode {
        &self.nodes[id.index() as usize]
    }
}
