//! End-to-end `interface` scenarios

use metaform_reflect::meta::interface::{
    COPY_OR_MOVE_MESSAGE, DATA_OBJECT_MESSAGE, FUNCTION_BODY_MESSAGE, NOT_PUBLIC_MESSAGE,
};
use metaform_reflect::{MetaFunctionRegistry, Session, apply_named_type};

fn compile(source: &str) -> Session {
    let session = Session::new();
    session
        .compile("scenario.src", source, &MetaFunctionRegistry::with_builtins())
        .unwrap();
    session
}

fn printed(session: &Session, name: &str) -> String {
    session.print(session.type_named(name).unwrap())
}

fn messages(session: &Session) -> Vec<String> {
    session.diagnostics().into_iter().map(|d| d.message).collect()
}

// =============================================================================
// Shape
// =============================================================================

#[test]
fn shape_with_a_draw_body() {
    let session = compile(
        "Shape: @interface type = {
    draw: (virtual this) = { };
    area: (this) -> int;
}",
    );
    assert_eq!(messages(&session), [FUNCTION_BODY_MESSAGE]);
    assert_eq!(session.diagnostics()[0].position.line, 2);
    assert_eq!(
        printed(&session, "Shape"),
        "Shape: @interface type = {
    public draw: (virtual this) = { }
    public area: (virtual this) -> int;
    public operator=: (virtual move this) = { }
}"
    );
}

#[test]
fn shape_without_bodies_is_clean() {
    let session = compile(
        "Shape: @interface type = {
    draw: (virtual this);
    area: (this) -> int;
}",
    );
    assert_eq!(session.error_count(), 0);
    let shape = session.type_declaration(session.type_named("Shape").unwrap()).unwrap();
    let fns = shape.get_member_functions();
    assert_eq!(fns.len(), 3);
    assert!(fns.iter().all(|f| f.is_public() && f.is_virtual()));
    assert!(fns[2].is_destructor());
    assert!(shape.is_polymorphic());
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn one_diagnostic_per_data_member() {
    let session = compile(
        "Bad: @interface type = {
    x: int;
    f: (this);
    y: std::string = \"\";
}",
    );
    let diagnostics = session.diagnostics();
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().all(|d| d.message == DATA_OBJECT_MESSAGE));
    assert_eq!(diagnostics[0].position.line, 2);
    assert_eq!(diagnostics[1].position.line, 4);

    let bad = session.type_declaration(session.type_named("Bad").unwrap()).unwrap();
    assert_eq!(bad.get_member_objects().len(), 2);
    assert!(bad.get_member_functions()[0].is_virtual());
}

#[test]
fn copy_constructor_suggests_clone() {
    let session = compile("C: @interface type = { operator=: (out this, that); }");
    assert_eq!(messages(&session), [COPY_OR_MOVE_MESSAGE]);
    assert!(COPY_OR_MOVE_MESSAGE.contains("clone()"));

    let c = session.type_declaration(session.type_named("C").unwrap()).unwrap();
    let copy = c.get_member_functions()[0];
    assert!(copy.is_public());
    assert!(copy.is_virtual());
    assert_eq!(c.get_members().len(), 2);
}

#[test]
fn every_rule_reports_independently() {
    let session = compile(
        "M: @interface type = {
    private operator=: (inout this, move that) = { }
}",
    );
    assert_eq!(
        messages(&session),
        [COPY_OR_MOVE_MESSAGE, FUNCTION_BODY_MESSAGE, NOT_PUBLIC_MESSAGE]
    );
}

// =============================================================================
// Destructors
// =============================================================================

#[test]
fn existing_destructor_is_made_virtual() {
    let session = compile("D: @interface type = { f: (this); operator=: (move this); }");
    assert_eq!(session.error_count(), 0);
    assert_eq!(
        printed(&session, "D"),
        "D: @interface type = {
    public f: (virtual this);
    public operator=: (virtual move this);
}"
    );
}

#[test]
fn empty_interface_gains_only_a_destructor() {
    let session = compile("E: @interface type = { }");
    assert_eq!(session.error_count(), 0);
    assert_eq!(
        printed(&session, "E"),
        "E: @interface type = {\n    public operator=: (virtual move this) = { }\n}"
    );
}

#[test]
fn reapplying_keeps_one_destructor() {
    let session = compile("R: @interface type = { f: (this); }");
    let before = printed(&session, "R");

    let report = apply_named_type(&session, "R", &MetaFunctionRegistry::with_builtins()).unwrap();
    assert!(report.succeeded());
    assert_eq!(printed(&session, "R"), before);
    // The synthesized destructor carries a body.
    assert_eq!(messages(&session), [FUNCTION_BODY_MESSAGE]);
}

// =============================================================================
// Properties
// =============================================================================

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn data_diagnostics_match_data_members(objects in 0usize..6, functions in 0usize..6) {
            let members: String = (0..objects)
                .map(|i| format!("x{i}: int; "))
                .chain((0..functions).map(|i| format!("f{i}: (this); ")))
                .collect();
            let session = compile(&format!("T: @interface type = {{ {members}}}"));

            prop_assert_eq!(session.error_count(), objects);
            let t = session.type_declaration(session.type_named("T").unwrap()).unwrap();
            prop_assert_eq!(t.get_member_functions().len(), functions + 1);
        }
    }
}
