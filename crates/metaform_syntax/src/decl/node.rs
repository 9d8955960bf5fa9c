//! Declaration node types stored in the [`DeclArena`](super::DeclArena).

use std::fmt;

use crate::ast::{
    Access, AliasKind, Initializer, MetaName, Parameter, PassingStyle, ThisSpecifier, TypeId,
};
use crate::span::Span;

/// Name of every special member function.
pub const SPECIAL_MEMBER_NAME: &str = "operator=";

/// Stable handle to a node in a [`DeclArena`](super::DeclArena).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(u32);

impl DeclId {
    /// Creates an id from a raw arena index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw arena index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclId({})", self.0)
    }
}

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A function's signature.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FunctionSig {
    /// Parameters in order.
    pub params: Vec<Parameter>,
    /// Return type, if written.
    pub returns: Option<TypeId>,
}

/// A data object's declared type.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ObjectInfo {
    /// Declared type; `None` when omitted.
    pub ty: Option<TypeId>,
}

/// A user-defined type's members.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TypeInfo {
    /// Member declarations in declaration order.
    pub members: Vec<DeclId>,
}

/// A namespace's members.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct NamespaceInfo {
    /// Member declarations in declaration order.
    pub members: Vec<DeclId>,
}

/// An alias declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasInfo {
    /// What kind of entity is aliased.
    pub of: AliasKind,
    /// The aliased text.
    pub target: String,
    /// Declared type for object aliases.
    pub ty: Option<TypeId>,
}

/// Kind-specific data of a declaration node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeclKind {
    /// A function.
    Function(FunctionSig),
    /// A data object.
    Object(ObjectInfo),
    /// A user-defined type.
    Type(TypeInfo),
    /// A namespace.
    Namespace(NamespaceInfo),
    /// An alias.
    Alias(AliasInfo),
}

impl DeclKind {
    /// Returns a short name for this kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Function(_) => "function",
            Self::Object(_) => "object",
            Self::Type(_) => "type",
            Self::Namespace(_) => "namespace",
            Self::Alias(_) => "alias",
        }
    }
}

/// Which members a scope query returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberFilter {
    /// Member functions only.
    Functions,
    /// Member objects only.
    Objects,
    /// Nested types only.
    Types,
    /// Every member.
    All,
}

impl MemberFilter {
    /// Returns true if a node of `kind` passes this filter.
    #[must_use]
    pub const fn matches(self, kind: &DeclKind) -> bool {
        match self {
            Self::Functions => matches!(kind, DeclKind::Function(_)),
            Self::Objects => matches!(kind, DeclKind::Object(_)),
            Self::Types => matches!(kind, DeclKind::Type(_)),
            Self::All => true,
        }
    }
}

/// Which copy/move constructors and assignments a type declares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeclaredThatFunctions {
    /// `operator=: (out this, that)` (copy constructor).
    pub out_this_in_that: bool,
    /// `operator=: (out this, move that)` (move constructor).
    pub out_this_move_that: bool,
    /// `operator=: (inout this, that)` (copy assignment).
    pub inout_this_in_that: bool,
    /// `operator=: (inout this, move that)` (move assignment).
    pub inout_this_move_that: bool,
}

/// A declaration in the arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclNode {
    /// Declared name; `None` for unnamed declarations.
    pub name: Option<String>,
    /// Access level.
    pub access: Access,
    /// Lexically enclosing declaration; `None` at global scope.
    pub parent: Option<DeclId>,
    /// Kind-specific data.
    pub kind: DeclKind,
    /// Initializer (function body or object value).
    pub initializer: Option<Initializer>,
    /// Attached meta-functions, in textual order.
    pub meta_functions: Vec<MetaName>,
    /// Source span.
    pub span: Span,
}

impl DeclNode {
    // =========================================================================
    // Common queries
    // =========================================================================

    /// Returns the declared name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns true if the declaration is named.
    #[must_use]
    pub fn has_name(&self) -> bool {
        self.name.is_some()
    }

    /// Returns true if the declaration is named `name`.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    /// Returns a short name for this declaration's kind.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    /// Returns true if access is explicitly `public`.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.access == Access::Public
    }

    /// Returns true if access is explicitly `protected`.
    #[must_use]
    pub fn is_protected(&self) -> bool {
        self.access == Access::Protected
    }

    /// Returns true if access is explicitly `private`.
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.access == Access::Private
    }

    /// Returns true if no access specifier applies.
    #[must_use]
    pub fn is_default_access(&self) -> bool {
        self.access == Access::Default
    }

    /// Returns true if an initializer (body or value) is present.
    #[must_use]
    pub fn has_initializer(&self) -> bool {
        self.initializer.is_some()
    }

    /// Returns true if the declaration is at global scope.
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns true for functions.
    #[must_use]
    pub const fn is_function(&self) -> bool {
        matches!(self.kind, DeclKind::Function(_))
    }

    /// Returns true for data objects.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self.kind, DeclKind::Object(_))
    }

    /// Returns true for user-defined types.
    #[must_use]
    pub const fn is_type(&self) -> bool {
        matches!(self.kind, DeclKind::Type(_))
    }

    /// Returns true for namespaces.
    #[must_use]
    pub const fn is_namespace(&self) -> bool {
        matches!(self.kind, DeclKind::Namespace(_))
    }

    /// Returns true for aliases.
    #[must_use]
    pub const fn is_alias(&self) -> bool {
        matches!(self.kind, DeclKind::Alias(_))
    }

    /// Returns the members of a type or namespace (empty otherwise).
    #[must_use]
    pub fn members(&self) -> &[DeclId] {
        match &self.kind {
            DeclKind::Type(info) => &info.members,
            DeclKind::Namespace(info) => &info.members,
            _ => &[],
        }
    }

    // =========================================================================
    // Function queries (false / empty for other kinds)
    // =========================================================================

    /// Returns the parameters of a function.
    #[must_use]
    pub fn params(&self) -> &[Parameter] {
        match &self.kind {
            DeclKind::Function(sig) => &sig.params,
            _ => &[],
        }
    }

    /// Returns the position of the parameter named `name`.
    #[must_use]
    pub fn index_of_parameter_named(&self, name: &str) -> Option<usize> {
        self.params().iter().position(|p| p.name == name)
    }

    /// Returns true if a parameter is named `name`.
    #[must_use]
    pub fn has_parameter_named(&self, name: &str) -> bool {
        self.index_of_parameter_named(name).is_some()
    }

    /// Returns true if the parameter named `name` is passed `pass`.
    #[must_use]
    pub fn has_parameter_with_pass(&self, name: &str, pass: PassingStyle) -> bool {
        self.params()
            .iter()
            .any(|p| p.name == name && p.pass == pass)
    }

    /// Returns the leading `this` parameter, if any.
    #[must_use]
    pub fn this_parameter(&self) -> Option<&Parameter> {
        self.params().first().filter(|p| p.is_this())
    }

    /// Returns true for member functions with an explicit `this`.
    #[must_use]
    pub fn is_function_with_this(&self) -> bool {
        self.this_parameter().is_some()
    }

    /// Returns true if `this` is marked `virtual`, `override` or `final`.
    #[must_use]
    pub fn is_virtual_function(&self) -> bool {
        self.this_parameter()
            .and_then(|p| p.specifier)
            .is_some_and(ThisSpecifier::is_virtual)
    }

    fn is_special_with_this(&self, pass: PassingStyle) -> bool {
        self.is_function()
            && self.is_named(SPECIAL_MEMBER_NAME)
            && self.this_parameter().is_some_and(|p| p.pass == pass)
    }

    fn that_parameter(&self) -> Option<&Parameter> {
        self.params().get(1).filter(|p| p.is_that())
    }

    /// Returns true for `operator=: (out this, ...)`.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.is_special_with_this(PassingStyle::Out)
    }

    /// Returns true for a constructor whose second parameter is `that`.
    #[must_use]
    pub fn is_constructor_with_that(&self) -> bool {
        self.is_constructor() && self.that_parameter().is_some()
    }

    /// Returns true for a copy constructor (`that` passed `in`).
    #[must_use]
    pub fn is_constructor_with_in_that(&self) -> bool {
        self.is_constructor() && self.that_parameter().is_some_and(|p| p.pass == PassingStyle::In)
    }

    /// Returns true for a move constructor (`that` passed `move`).
    #[must_use]
    pub fn is_constructor_with_move_that(&self) -> bool {
        self.is_constructor()
            && self
                .that_parameter()
                .is_some_and(|p| p.pass == PassingStyle::Move)
    }

    /// Returns true for `operator=: (inout this, x)`.
    #[must_use]
    pub fn is_assignment(&self) -> bool {
        self.is_special_with_this(PassingStyle::Inout) && self.params().len() >= 2
    }

    /// Returns true for an assignment whose second parameter is `that`.
    #[must_use]
    pub fn is_assignment_with_that(&self) -> bool {
        self.is_assignment() && self.that_parameter().is_some()
    }

    /// Returns true for a copy assignment (`that` passed `in`).
    #[must_use]
    pub fn is_assignment_with_in_that(&self) -> bool {
        self.is_assignment() && self.that_parameter().is_some_and(|p| p.pass == PassingStyle::In)
    }

    /// Returns true for a move assignment (`that` passed `move`).
    #[must_use]
    pub fn is_assignment_with_move_that(&self) -> bool {
        self.is_assignment()
            && self
                .that_parameter()
                .is_some_and(|p| p.pass == PassingStyle::Move)
    }

    /// Returns true for `operator=: (move this)`.
    #[must_use]
    pub fn is_destructor(&self) -> bool {
        self.is_special_with_this(PassingStyle::Move) && self.params().len() == 1
    }

    /// Returns true for any copy/move constructor or assignment.
    #[must_use]
    pub fn is_copy_or_move(&self) -> bool {
        self.is_constructor_with_that() || self.is_assignment_with_that()
    }

    // =========================================================================
    // Object queries
    // =========================================================================

    /// Returns the declared type of an object or object alias.
    #[must_use]
    pub fn object_type(&self) -> Option<&TypeId> {
        match &self.kind {
            DeclKind::Object(info) => info.ty.as_ref(),
            DeclKind::Alias(info) => info.ty.as_ref(),
            _ => None,
        }
    }

    /// Returns true for an object whose type was written `const`.
    #[must_use]
    pub fn is_const(&self) -> bool {
        self.object_type().is_some_and(|t| t.is_const)
    }

    /// Returns true for an object whose type is left to be inferred.
    #[must_use]
    pub fn has_wildcard_type(&self) -> bool {
        match &self.kind {
            DeclKind::Object(info) => info.ty.as_ref().is_none_or(TypeId::is_wildcard),
            _ => false,
        }
    }
}
