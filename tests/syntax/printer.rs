//! Integration tests for the pretty-printer

use metaform_syntax::pretty::{PrettyConfig, print_all, print_declaration_with_config};
use metaform_syntax::{DeclArena, parse, parse_one};

fn arena_with(src: &str) -> DeclArena {
    let mut arena = DeclArena::new();
    for decl in parse(src).unwrap() {
        arena.alloc_root(decl);
    }
    arena
}

#[test]
fn prints_synthesized_members() {
    let mut arena = arena_with("I: type = { f: (virtual this); }");
    let t = arena.roots()[0];
    arena.add_type_member(t, parse_one("public operator=: (virtual move this) = { }").unwrap());
    assert_eq!(
        print_all(&arena),
        "I: type = {\n    f: (virtual this);\n    public operator=: (virtual move this) = { }\n}"
    );
}

#[test]
fn printed_output_reparses_identically() {
    let source = "N: namespace = {
        Shape: @interface type = {
            draw: (virtual this);
            protected area: (this) -> int = 0;
        }
    }";
    let printed = print_all(&arena_with(source));
    assert_eq!(print_all(&arena_with(&printed)), printed);
}

#[test]
fn custom_indent_width() {
    let arena = arena_with("T: type = { x: int; }");
    let printed = print_declaration_with_config(&arena, arena.roots()[0], PrettyConfig { indent_width: 1 });
    assert_eq!(printed, "T: type = {\n x: int;\n}");
}
