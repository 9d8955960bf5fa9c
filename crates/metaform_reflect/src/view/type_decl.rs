//! Type declaration view: member enumeration and synthesis.

use metaform_syntax::{DeclId, DeclaredThatFunctions, MemberFilter, MetaName};

use super::{Declaration, FunctionDeclaration, ObjectDeclaration};

/// View over a user-defined type.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TypeDeclaration<'s> {
    base: Declaration<'s>,
}

specialized_view!(TypeDeclaration, as_type);

impl<'s> TypeDeclaration<'s> {
    pub(super) fn wrap(base: Declaration<'s>) -> Self {
        Self { base }
    }

    /// Returns true if the type has a virtual function or a polymorphic base.
    #[must_use]
    pub fn is_polymorphic(&self) -> bool {
        self.services().session().arena().is_polymorphic(self.id())
    }

    /// Returns the meta-functions attached to this type, in textual order.
    #[must_use]
    pub fn meta_functions(&self) -> Vec<MetaName> {
        self.with_node(|n| n.meta_functions.clone())
    }

    /// Reports which copy/move functions this type declares.
    #[must_use]
    pub fn query_declared_that_functions(&self) -> DeclaredThatFunctions {
        self.services()
            .session()
            .arena()
            .find_declared_that_functions(self.id())
    }

    // =========================================================================
    // Member snapshots
    // =========================================================================

    fn member_views(&self, filter: MemberFilter) -> Vec<Declaration<'s>> {
        let services = self.services();
        let ids: Vec<DeclId> = services
            .session()
            .arena()
            .type_scope_declarations(self.id(), filter);
        ids.into_iter()
            .map(|id| Declaration::new(id, services))
            .collect()
    }

    /// Returns a snapshot of the member functions, in declaration order.
    #[must_use]
    pub fn get_member_functions(&self) -> Vec<FunctionDeclaration<'s>> {
        self.member_views(MemberFilter::Functions)
            .into_iter()
            .map(FunctionDeclaration::wrap)
            .collect()
    }

    /// Returns a snapshot of the member objects, in declaration order.
    #[must_use]
    pub fn get_member_objects(&self) -> Vec<ObjectDeclaration<'s>> {
        self.member_views(MemberFilter::Objects)
            .into_iter()
            .map(ObjectDeclaration::wrap)
            .collect()
    }

    /// Returns a snapshot of the nested types, in declaration order.
    #[must_use]
    pub fn get_member_types(&self) -> Vec<TypeDeclaration<'s>> {
        self.member_views(MemberFilter::Types)
            .into_iter()
            .map(TypeDeclaration::wrap)
            .collect()
    }

    /// Returns a snapshot of every member, in declaration order.
    ///
    /// Members added later through [`TypeDeclaration::add_member`] do not
    /// appear in a snapshot taken earlier.
    #[must_use]
    pub fn get_members(&self) -> Vec<Declaration<'s>> {
        self.member_views(MemberFilter::All)
    }

    // =========================================================================
    // Synthesis
    // =========================================================================

    /// Parses `source` as one declaration and appends it to the members.
    ///
    /// Returns false, leaving the members untouched, if the fragment does
    /// not parse.
    pub fn add_member(&self, source: &str) -> bool {
        let Some(syntax) = self.services().parse_fragment(source) else {
            return false;
        };
        let session = self.services().session();
        let added = session.arena_mut().add_type_member(self.id(), syntax);
        if let Some(id) = added {
            tracing::debug!(target: "metaform::services", type_name = %self.name(), member = %id, "member added");
        }
        added.is_some()
    }
}
