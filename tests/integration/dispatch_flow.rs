//! Session-level dispatch flows

use metaform_foundation::{ErrorKind, Severity};
use metaform_reflect::dispatch::unrecognized_message;
use metaform_reflect::{
    MetaFunctionRegistry, Session, SessionConfig, TypeDeclaration, apply_type_meta_functions,
};

fn record_name(t: &TypeDeclaration<'_>) {
    t.require(false, &t.name());
}

fn add_broken_member(t: &TypeDeclaration<'_>) {
    let before = t.get_members().len();
    let errors = t.services().new_error_count();
    let added = t.add_member("broken: (this");
    t.require(!added, "fragment unexpectedly parsed");
    t.require(t.get_members().len() == before, "members changed");
    t.require(t.services().new_error_count() == errors + 1, "fragment error not counted");
}

fn registry() -> MetaFunctionRegistry {
    let mut registry = MetaFunctionRegistry::with_builtins();
    registry.register("record_name", record_name);
    registry.register("add_broken_member", add_broken_member);
    registry
}

// =============================================================================
// Order
// =============================================================================

#[test]
fn nested_types_dispatch_in_preorder() {
    let session = Session::new();
    session
        .compile(
            "order.src",
            "Outer: @record_name type = {
    Inner: @record_name type = { }
    Plain: type = { Deep: @record_name type = { } }
}
Next: @record_name type = { }",
            &registry(),
        )
        .unwrap();
    let names: Vec<_> = session.diagnostics().into_iter().map(|d| d.message).collect();
    assert_eq!(names, ["Outer", "Inner", "Deep", "Next"]);
}

#[test]
fn report_lists_each_invocation() {
    let session = Session::with_config(SessionConfig::parse_only());
    let ids = session
        .compile("r.src", "T: @record_name @interface type = { x: int; }", &registry())
        .unwrap();
    assert_eq!(session.error_count(), 0);

    let report = apply_type_meta_functions(&session, ids[0], &registry()).unwrap();
    assert_eq!(report.attached, 2);
    assert_eq!(report.applied[0].diagnostics.len(), 1);
    assert_eq!(report.applied[1].name, "interface");
    assert_eq!(report.applied[1].diagnostics.len(), 1);
    assert_eq!(report.new_errors(), 2);
}

#[test]
fn later_files_leave_earlier_types_alone() {
    let session = Session::new();
    let registry = MetaFunctionRegistry::with_builtins();
    session
        .compile("a.src", "A: @interface type = { f: (this); }", &registry)
        .unwrap();
    let a = session.type_named("A").unwrap();
    let printed_a = session.print(a);
    assert_eq!(session.error_count(), 0);

    session
        .compile("b.src", "B: @interface type = { g: (this); }", &registry)
        .unwrap();
    assert_eq!(session.error_count(), 0);
    assert_eq!(session.print(a), printed_a);
    let b = session.type_named("B").unwrap();
    assert_eq!(session.with_arena(|arena| arena[b].members().len()), 2);
}

#[test]
fn dispatch_count_covers_only_new_types() {
    let session = Session::new();
    let registry = registry();
    session
        .parse_file("one.src", "A: @record_name type = { Inner: @record_name type = { } }")
        .unwrap();
    assert_eq!(session.run_meta_functions(&registry).unwrap(), 2);

    session
        .parse_file("two.src", "B: @record_name type = { } C: type = { }")
        .unwrap();
    assert_eq!(session.run_meta_functions(&registry).unwrap(), 1);
    assert_eq!(session.run_meta_functions(&registry).unwrap(), 0);

    let names: Vec<_> = session.diagnostics().into_iter().map(|d| d.message).collect();
    assert_eq!(names, ["A", "Inner", "B"]);
}

// =============================================================================
// Unknown names
// =============================================================================

#[test]
fn unknown_name_stops_the_compilation() {
    let session = Session::new();
    let err = session
        .compile(
            "u.src",
            "A: @interface @ordered @record_name type = { f: (this); }
B: @interface type = { }",
            &registry(),
        )
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownMetaFunction(ref n) if n == "ordered"));

    let diagnostics = session.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Fatal);
    assert_eq!(diagnostics[0].message, unrecognized_message("ordered"));
    assert_eq!(diagnostics[0].position.column, 16);

    let member_count = |name: &str| {
        let id = session.type_named(name).unwrap();
        session.with_arena(|arena| arena[id].members().len())
    };
    // `interface` ran on A before the unknown name; B was never reached.
    assert_eq!(member_count("A"), 2);
    assert_eq!(member_count("B"), 0);
}

// =============================================================================
// Synthesis
// =============================================================================

#[test]
fn invalid_fragment_adds_exactly_one_error() {
    let session = Session::new();
    session
        .compile("s.src", "S: @add_broken_member type = { f: (this); }", &registry())
        .unwrap();
    let diagnostics = session.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("parse error"));
    assert_eq!(session.source_name(diagnostics[0].position.source).as_deref(), Some("<generated>"));
}

#[test]
fn types_without_meta_functions_are_untouched() {
    let session = Session::new();
    session
        .compile("p.src", "P: type = { x: int; f: (this) = { } }", &registry())
        .unwrap();
    assert_eq!(session.error_count(), 0);
    assert_eq!(
        session.print(session.type_named("P").unwrap()),
        "P: type = {\n    x: int;\n    f: (this) = { }\n}"
    );
}

#[test]
fn parse_only_leaves_interfaces_unprocessed() {
    let session = Session::with_config(SessionConfig::parse_only());
    session
        .compile("p.src", "I: @interface type = { x: int; }", &registry())
        .unwrap();
    assert_eq!(session.error_count(), 0);
    let i = session.type_declaration(session.type_named("I").unwrap()).unwrap();
    assert_eq!(i.get_members().len(), 1);
}
