//! Syntax tree for host-language declarations.
//!
//! The parser produces owned [`DeclSyntax`] trees. They are detached from
//! any session; [`DeclArena`](crate::DeclArena) allocates them into
//! addressable nodes.

use std::fmt;

use crate::span::Span;

/// Access level written on a declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Access {
    /// No access specifier was written.
    #[default]
    Default,
    /// `public`
    Public,
    /// `protected`
    Protected,
    /// `private`
    Private,
}

impl Access {
    /// Parses an access keyword.
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "public" => Some(Self::Public),
            "protected" => Some(Self::Protected),
            "private" => Some(Self::Private),
            _ => None,
        }
    }

    /// Returns the keyword for this access level, or `None` for the default.
    #[must_use]
    pub const fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Public => Some("public"),
            Self::Protected => Some("protected"),
            Self::Private => Some("private"),
        }
    }
}

/// How a parameter is passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PassingStyle {
    /// `in` (the default when nothing is written)
    #[default]
    In,
    /// `copy`
    Copy,
    /// `inout`
    Inout,
    /// `out`
    Out,
    /// `move`
    Move,
    /// `forward`
    Forward,
}

impl PassingStyle {
    /// Parses a passing-style keyword.
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "in" => Some(Self::In),
            "copy" => Some(Self::Copy),
            "inout" => Some(Self::Inout),
            "out" => Some(Self::Out),
            "move" => Some(Self::Move),
            "forward" => Some(Self::Forward),
            _ => None,
        }
    }

    /// Returns the keyword for this passing style.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Copy => "copy",
            Self::Inout => "inout",
            Self::Out => "out",
            Self::Move => "move",
            Self::Forward => "forward",
        }
    }
}

/// Modifier written before a `this` parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThisSpecifier {
    /// `implicit`
    Implicit,
    /// `virtual`
    Virtual,
    /// `override`
    Override,
    /// `final`
    Final,
}

impl ThisSpecifier {
    /// Parses a specifier keyword.
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "implicit" => Some(Self::Implicit),
            "virtual" => Some(Self::Virtual),
            "override" => Some(Self::Override),
            "final" => Some(Self::Final),
            _ => None,
        }
    }

    /// Returns the keyword for this specifier.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Implicit => "implicit",
            Self::Virtual => "virtual",
            Self::Override => "override",
            Self::Final => "final",
        }
    }

    /// Returns true if this specifier makes the function dispatch dynamically.
    #[must_use]
    pub const fn is_virtual(self) -> bool {
        matches!(self, Self::Virtual | Self::Override | Self::Final)
    }
}

/// A written type, kept as source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeId {
    /// The type text without a leading `const`, e.g. `std::vector<int>`.
    pub text: String,
    /// Whether the type was written with a leading `const`.
    pub is_const: bool,
}

impl TypeId {
    /// Creates a type id.
    #[must_use]
    pub fn new(text: impl Into<String>, is_const: bool) -> Self {
        Self {
            text: text.into(),
            is_const,
        }
    }

    /// Returns true if the type is the `_` wildcard (left to be inferred).
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.text == "_"
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_const {
            write!(f, "const {}", self.text)
        } else {
            f.write_str(&self.text)
        }
    }
}

/// A function parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name (`this` and `that` are significant).
    pub name: String,
    /// How the parameter is passed.
    pub pass: PassingStyle,
    /// Modifier written before the parameter, if any.
    pub specifier: Option<ThisSpecifier>,
    /// Declared type, if written.
    pub ty: Option<TypeId>,
    /// Default argument text, if written.
    pub default: Option<String>,
    /// Source span.
    pub span: Span,
}

impl Parameter {
    /// Creates an `in` parameter with no type or modifier.
    #[must_use]
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            pass: PassingStyle::In,
            specifier: None,
            ty: None,
            default: None,
            span,
        }
    }

    /// Returns true if this parameter is named `this`.
    #[must_use]
    pub fn is_this(&self) -> bool {
        self.name == "this"
    }

    /// Returns true if this parameter is named `that`.
    #[must_use]
    pub fn is_that(&self) -> bool {
        self.name == "that"
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(spec) = self.specifier {
            write!(f, "{} ", spec.keyword())?;
        }
        if self.pass != PassingStyle::In {
            write!(f, "{} ", self.pass.keyword())?;
        }
        f.write_str(&self.name)?;
        if let Some(ty) = &self.ty {
            write!(f, ": {ty}")?;
        }
        if let Some(default) = &self.default {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}

/// Shape of an initializer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitializerKind {
    /// A braced block, e.g. a function body `{ ... }`.
    Block,
    /// An expression terminated by `;`.
    Expression,
}

/// The `= ...` part of a declaration, kept as source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Initializer {
    /// Block or expression.
    pub kind: InitializerKind,
    /// The initializer text, tokens separated by single spaces.
    pub text: String,
    /// Source span.
    pub span: Span,
}

/// A meta-function name attached to a type with `@name`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetaName {
    /// The meta-function name.
    pub name: String,
    /// Source span of the name.
    pub span: Span,
}

/// What an alias stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AliasKind {
    /// `N: type == T;`
    Type,
    /// `N: namespace == M;`
    Namespace,
    /// `N: T == value;`
    Object,
}

/// A parsed declaration and everything nested inside it.
#[derive(Clone, Debug, PartialEq)]
pub struct DeclSyntax {
    /// Declared name.
    pub name: String,
    /// Written access level.
    pub access: Access,
    /// Meta-functions attached with `@name` (types only).
    pub meta_functions: Vec<MetaName>,
    /// Kind-specific shape.
    pub kind: DeclSyntaxKind,
    /// Initializer, if any (types and namespaces keep members instead).
    pub initializer: Option<Initializer>,
    /// Source span.
    pub span: Span,
}

/// Kind-specific parts of a declaration.
#[derive(Clone, Debug, PartialEq)]
pub enum DeclSyntaxKind {
    /// A function.
    Function {
        /// Parameters in order.
        params: Vec<Parameter>,
        /// Return type, if written.
        returns: Option<TypeId>,
    },
    /// A data object; `None` means the type was omitted.
    Object {
        /// Declared type, if written.
        ty: Option<TypeId>,
    },
    /// A user-defined type.
    Type {
        /// Member declarations in order.
        members: Vec<DeclSyntax>,
    },
    /// A namespace.
    Namespace {
        /// Member declarations in order.
        members: Vec<DeclSyntax>,
    },
    /// An alias.
    Alias {
        /// What kind of entity is aliased.
        of: AliasKind,
        /// The aliased text.
        target: String,
        /// Declared type for object aliases.
        ty: Option<TypeId>,
    },
}

impl DeclSyntax {
    /// Returns a short name for this declaration's kind.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self.kind {
            DeclSyntaxKind::Function { .. } => "function",
            DeclSyntaxKind::Object { .. } => "object",
            DeclSyntaxKind::Type { .. } => "type",
            DeclSyntaxKind::Namespace { .. } => "namespace",
            DeclSyntaxKind::Alias { .. } => "alias",
        }
    }

    /// Returns the nested member declarations of a type or namespace.
    #[must_use]
    pub fn members(&self) -> &[DeclSyntax] {
        match &self.kind {
            DeclSyntaxKind::Type { members } | DeclSyntaxKind::Namespace { members } => members,
            _ => &[],
        }
    }

    /// Returns true if this is a function declaration.
    #[must_use]
    pub const fn is_function(&self) -> bool {
        matches!(self.kind, DeclSyntaxKind::Function { .. })
    }

    /// Returns true if this is a type declaration.
    #[must_use]
    pub const fn is_type(&self) -> bool {
        matches!(self.kind, DeclSyntaxKind::Type { .. })
    }
}
