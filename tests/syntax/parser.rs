//! Integration tests for the parser

use metaform_foundation::ErrorKind;
use metaform_syntax::{
    Access, DeclSyntaxKind, InitializerKind, PassingStyle, ThisSpecifier, parse, parse_one,
};

// =============================================================================
// Declarations
// =============================================================================

#[test]
fn parse_interface_type() {
    let decl = parse_one(
        "Shape: @interface type = {
            draw: (virtual this);
            area: (this) -> int;
        }",
    )
    .unwrap();
    assert!(decl.is_type());
    assert_eq!(decl.meta_functions[0].name, "interface");
    assert_eq!(decl.meta_functions[0].span.column, 9);
    assert_eq!(decl.members().len(), 2);
    assert!(decl.members().iter().all(|m| m.is_function()));
}

#[test]
fn parse_special_members() {
    let decl = parse_one("operator=: (inout this, move that) = { }").unwrap();
    assert_eq!(decl.name, "operator=");
    let DeclSyntaxKind::Function { params, returns } = &decl.kind else {
        panic!("expected a function");
    };
    assert!(returns.is_none());
    assert_eq!(params[0].pass, PassingStyle::Inout);
    assert!(params[1].is_that());
    assert_eq!(params[1].pass, PassingStyle::Move);
    assert_eq!(decl.initializer.as_ref().map(|i| i.kind), Some(InitializerKind::Block));
}

#[test]
fn parse_this_specifiers() {
    for (word, specifier) in [
        ("virtual", ThisSpecifier::Virtual),
        ("override", ThisSpecifier::Override),
        ("final", ThisSpecifier::Final),
    ] {
        let decl = parse_one(&format!("f: ({word} this);")).unwrap();
        let DeclSyntaxKind::Function { params, .. } = &decl.kind else {
            panic!("expected a function");
        };
        assert_eq!(params[0].specifier, Some(specifier));
    }
}

#[test]
fn parse_access_on_members() {
    let decl = parse_one("T: type = { protected f: (this); g: (this); }").unwrap();
    assert_eq!(decl.members()[0].access, Access::Protected);
    assert_eq!(decl.members()[1].access, Access::Default);
}

#[test]
fn parse_nested_scopes() {
    let decls = parse("outer: namespace = { A: type = { B: @interface type = { } } } C: type = { }")
        .unwrap();
    assert_eq!(decls.len(), 2);
    let a = &decls[0].members()[0];
    assert_eq!(a.name, "A");
    assert_eq!(a.members()[0].meta_functions.len(), 1);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn parse_error_positions() {
    let err = parse("T: type = {\n    f: (this;\n}").unwrap_err();
    let ErrorKind::ParseError { line, .. } = err.kind else {
        panic!("expected a parse error");
    };
    assert_eq!(line, 2);
}

#[test]
fn parse_one_requires_exactly_one() {
    assert!(parse_one("").is_err());
    assert!(parse_one("a: int; b: int;").is_err());
    assert!(parse_one("a: int;").is_ok());
}

#[test]
fn meta_functions_only_on_types() {
    let err = parse_one("x: @interface int;").unwrap_err();
    assert!(err.is_parse_error());
}
