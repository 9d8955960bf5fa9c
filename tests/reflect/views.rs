//! Integration tests for declaration views

use metaform_foundation::ErrorKind;
use metaform_reflect::{Declaration, FunctionDeclaration, Session, TypeDeclaration};

const SOURCE: &str = "Widget: type = {
    draw: (virtual this);
    resize: (inout this, w: int, h: int);
    make: (w: int) -> Widget;
    operator=: (out this, that) = { }
    operator=: (inout this, move that) = { }
    operator=: (move this) = { }
    count: const int = 0;
    Part: type = { }
}";

fn widget(session: &Session) -> TypeDeclaration<'_> {
    session.parse_file("widget.src", SOURCE).unwrap();
    session
        .type_declaration(session.type_named("Widget").unwrap())
        .unwrap()
}

// =============================================================================
// Enumeration
// =============================================================================

#[test]
fn member_enumeration() {
    let session = Session::new();
    let w = widget(&session);
    assert_eq!(w.get_members().len(), 8);
    assert_eq!(w.get_member_functions().len(), 6);
    assert_eq!(w.get_member_objects().len(), 1);
    assert_eq!(w.get_member_types().len(), 1);
    assert!(w.is_polymorphic());
}

#[test]
fn base_queries() {
    let session = Session::new();
    let w = widget(&session);
    assert!(w.is_global());
    assert!(w.has_name_eq("Widget"));
    assert_eq!(w.kind_name(), "type");

    let part = w.get_member_types()[0];
    assert!(part.parent_is_type());
    assert!(part.parent_is_polymorphic());
    assert!(!part.is_polymorphic());
}

// =============================================================================
// Functions
// =============================================================================

#[test]
fn function_classification() {
    let session = Session::new();
    let fns = widget(&session).get_member_functions();

    assert!(fns[0].is_virtual());
    assert!(fns[1].is_function_with_this());
    assert_eq!(fns[1].parameter_count(), 3);
    assert_eq!(fns[1].index_of_parameter_named("h"), Some(2));
    assert!(fns[1].has_in_parameter_named("w"));
    assert!(!fns[2].is_function_with_this());

    assert!(fns[3].is_constructor_with_in_that());
    assert!(fns[3].is_copy_or_move());
    assert!(fns[4].is_assignment_with_move_that());
    assert!(fns[4].is_copy_or_move());
    assert!(fns[5].is_destructor());
    assert!(!fns[5].is_copy_or_move());
}

#[test]
fn that_functions_from_either_view() {
    let session = Session::new();
    let w = widget(&session);
    let from_type = w.query_declared_that_functions();
    let from_member = w.get_member_functions()[0].query_declared_that_functions();
    assert_eq!(from_type, from_member);
    assert!(from_type.out_this_in_that);
    assert!(from_type.inout_this_move_that);
    assert!(!from_type.out_this_move_that);
}

#[test]
fn mutation_through_views() {
    let session = Session::new();
    let fns = widget(&session).get_member_functions();

    assert!(fns[1].make_public());
    assert!(fns[1].is_public());
    assert!(!fns[1].make_private());
    assert!(fns[1].make_function_virtual());
    assert!(fns[1].is_virtual());

    assert!(!fns[2].make_function_virtual());
    assert!(!fns[2].is_virtual());
}

#[test]
fn default_access_can_become_private_or_protected() {
    let session = Session::new();
    let fns = widget(&session).get_member_functions();

    assert!(fns[2].make_private());
    assert!(fns[2].is_private());
    assert!(!fns[2].is_default_access());
    assert!(!fns[2].make_public());
    assert!(fns[2].is_private());

    assert!(fns[0].make_protected());
    assert!(fns[0].is_protected());
    assert!(fns[0].make_protected());
    assert!(!fns[0].make_private());
    assert!(fns[0].is_protected());
}

// =============================================================================
// Down-casts
// =============================================================================

#[test]
fn checked_down_casts() {
    let session = Session::new();
    let w = widget(&session);
    let members = w.get_members();

    assert!(members[0].as_function().is_ok());
    let err = members[0].as_type().unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::WrongDeclarationKind { expected: "type", actual: "function" }
    ));
    assert!(members[6].as_object().is_ok());
    assert!(FunctionDeclaration::try_from(members[6]).is_err());

    let base: Declaration<'_> = members[7].as_type().unwrap().into();
    assert_eq!(base, members[7]);
}
