//! Declaration arena: the addressable form of parsed declarations.
//!
//! The parser produces detached [`DeclSyntax`](crate::DeclSyntax) trees;
//! [`DeclArena`] allocates them into [`DeclNode`]s addressed by stable
//! [`DeclId`]s and exposes the structural queries and the few mutators
//! (access, virtuality, appending type members) the reflection layer needs.
//!
//! # Module Structure
//!
//! - `node` - Node, kind and id definitions plus per-node queries
//! - `arena` - The `DeclArena` implementation

mod arena;
mod node;


pub use arena::DeclArena;
pub use node::{
    AliasInfo, DeclId, DeclKind, DeclNode, DeclaredThatFunctions, FunctionSig, MemberFilter,
    NamespaceInfo, ObjectInfo, SPECIAL_MEMBER_NAME, TypeInfo,
};
