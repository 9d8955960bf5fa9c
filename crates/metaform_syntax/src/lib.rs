//! Host-language front end for metaform.
//!
//! This crate provides:
//! - [`Lexer`] / [`Token`] - Tokenization of declaration source
//! - [`SourceMap`] - Durable storage of every lexed source and its tokens
//! - [`Parser`] - Declarations into owned [`DeclSyntax`] trees
//! - [`DeclArena`] - Addressable declaration nodes with structural queries
//! - [`pretty`] - Printing declarations back to source text

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod decl;
pub mod lexer;
pub mod parser;
pub mod pretty;
pub mod source;
pub mod span;
pub mod token;

pub use ast::{
    Access, AliasKind, DeclSyntax, DeclSyntaxKind, Initializer, InitializerKind, MetaName,
    Parameter, PassingStyle, ThisSpecifier, TypeId,
};
pub use decl::{
    DeclArena, DeclId, DeclKind, DeclNode, DeclaredThatFunctions, MemberFilter,
    SPECIAL_MEMBER_NAME,
};
pub use lexer::Lexer;
pub use parser::{Parser, parse, parse_one};
pub use source::{SourceFile, SourceLine, SourceMap, SourceOrigin};
pub use span::Span;
pub use token::{Token, TokenKind};
