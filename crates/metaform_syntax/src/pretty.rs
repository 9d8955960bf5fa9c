//! Pretty-printer for arena declarations.
//!
//! This module converts declarations (including members synthesized after
//! parsing) back to host-language source text.
//!
//! # Example
//!
//! ```
//! use metaform_syntax::{DeclArena, parse, pretty::print_declaration};
//!
//! let mut arena = DeclArena::new();
//! let id = arena.alloc_root(parse("area: (this) -> int;").unwrap().remove(0));
//! assert_eq!(print_declaration(&arena, id), "area: (this) -> int;");
//! ```

use crate::ast::{AliasKind, InitializerKind};
use crate::decl::{DeclArena, DeclId, DeclKind, DeclNode};

/// Configuration for pretty-printing.
#[derive(Debug, Clone)]
pub struct PrettyConfig {
    /// Number of spaces for each indentation level.
    pub indent_width: usize,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self { indent_width: 4 }
    }
}

/// Pretty-print a declaration (recursively) to a string.
#[must_use]
pub fn print_declaration(arena: &DeclArena, id: DeclId) -> String {
    print_declaration_with_config(arena, id, PrettyConfig::default())
}

/// Pretty-print a declaration with custom configuration.
#[must_use]
pub fn print_declaration_with_config(arena: &DeclArena, id: DeclId, config: PrettyConfig) -> String {
    let mut printer = PrettyPrinter::new(arena, config);
    printer.print(id);
    printer.output
}

/// Pretty-print every top-level declaration, one per line.
#[must_use]
pub fn print_all(arena: &DeclArena) -> String {
    arena
        .roots()
        .iter()
        .map(|&id| print_declaration(arena, id))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty-printer state.
struct PrettyPrinter<'a> {
    arena: &'a DeclArena,
    config: PrettyConfig,
    output: String,
    indent_level: usize,
}

impl<'a> PrettyPrinter<'a> {
    fn new(arena: &'a DeclArena, config: PrettyConfig) -> Self {
        Self {
            arena,
            config,
            output: String::new(),
            indent_level: 0,
        }
    }

    fn print(&mut self, id: DeclId) {
        let Some(node) = self.arena.get(id) else {
            return;
        };

        if let Some(keyword) = node.access.keyword() {
            self.output.push_str(keyword);
            self.output.push(' ');
        }
        self.output.push_str(node.name().unwrap_or("_"));
        self.output.push(':');
        for meta in &node.meta_functions {
            self.output.push_str(" @");
            self.output.push_str(&meta.name);
        }

        match &node.kind {
            DeclKind::Function(sig) => {
                let params: Vec<String> = sig.params.iter().map(ToString::to_string).collect();
                self.output.push_str(" (");
                self.output.push_str(&params.join(", "));
                self.output.push(')');
                if let Some(returns) = &sig.returns {
                    self.output.push_str(" -> ");
                    self.output.push_str(&returns.to_string());
                }
                self.print_initializer(node);
            }
            DeclKind::Object(info) => {
                if let Some(ty) = &info.ty {
                    self.output.push(' ');
                    self.output.push_str(&ty.to_string());
                }
                self.print_initializer(node);
            }
            DeclKind::Type(info) => {
                self.output.push_str(" type = ");
                self.print_members(&info.members);
            }
            DeclKind::Namespace(info) => {
                self.output.push_str(" namespace = ");
                self.print_members(&info.members);
            }
            DeclKind::Alias(info) => {
                match (info.of, &info.ty) {
                    (AliasKind::Type, _) => self.output.push_str(" type"),
                    (AliasKind::Namespace, _) => self.output.push_str(" namespace"),
                    (AliasKind::Object, Some(ty)) => {
                        self.output.push(' ');
                        self.output.push_str(&ty.to_string());
                    }
                    (AliasKind::Object, None) => {}
                }
                self.output.push_str(" == ");
                self.output.push_str(&info.target);
                self.output.push(';');
            }
        }
    }

    fn print_initializer(&mut self, node: &DeclNode) {
        match &node.initializer {
            Some(init) => {
                self.output.push_str(" = ");
                self.output.push_str(&init.text);
                if init.kind == InitializerKind::Expression {
                    self.output.push(';');
                }
            }
            None => self.output.push(';'),
        }
    }

    fn print_members(&mut self, members: &[DeclId]) {
        if members.is_empty() {
            self.output.push_str("{ }");
            return;
        }
        self.output.push('{');
        self.indent_level += 1;
        for &member in members {
            self.output.push('\n');
            self.write_indent();
            self.print(member);
        }
        self.indent_level -= 1;
        self.output.push('\n');
        self.write_indent();
        self.output.push('}');
    }

    fn write_indent(&mut self) {
        let width = self.indent_level * self.config.indent_width;
        self.output.extend(std::iter::repeat_n(' ', width));
    }
}
