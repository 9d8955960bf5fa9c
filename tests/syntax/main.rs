//! Integration tests for Layer 1: Syntax
//!
//! Tests for the lexer, source map, parser, declaration arena, and printer.

mod arena;
mod lexer;
mod parser;
mod printer;
