//! Integration tests for the meta-function registry

use metaform_reflect::{MetaFunctionRegistry, Session, TypeDeclaration};

fn tag(t: &TypeDeclaration<'_>) {
    t.add_member("tagged: (this) -> bool;");
}

#[test]
fn custom_meta_functions_run_through_the_session() {
    let mut registry = MetaFunctionRegistry::with_builtins();
    registry.register("tag", tag);
    assert_eq!(registry.names(), ["interface", "tag"]);

    let session = Session::new();
    session
        .compile("tag.src", "T: @tag type = { x: int; }", &registry)
        .unwrap();
    let t = session.type_declaration(session.type_named("T").unwrap()).unwrap();
    assert_eq!(t.get_members().len(), 2);
    assert!(t.get_member_functions()[0].has_name_eq("tagged"));
    assert_eq!(session.error_count(), 0);
}

#[test]
fn empty_registry_rejects_interface() {
    let registry = MetaFunctionRegistry::new();
    let session = Session::new();
    assert!(session
        .compile("i.src", "I: @interface type = { }", &registry)
        .is_err());
    assert!(session.diagnostics()[0].severity.is_fatal());
}
