//! Integration tests for compiler services

use metaform_reflect::{Session, SessionConfig};
use metaform_syntax::SourceOrigin;

// =============================================================================
// require
// =============================================================================

#[test]
fn require_records_failures_at_position() {
    let session = Session::new();
    let ids = session.parse_file("r.src", "T: type = {\n  x: int;\n}").unwrap();
    let t = session.type_declaration(ids[0]).unwrap();
    let x = t.get_members()[0];

    x.require(true, "never recorded");
    x.require(false, "x is not allowed");

    let diagnostics = session.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "x is not allowed");
    assert_eq!(diagnostics[0].position.line, 2);
    assert_eq!(diagnostics[0].position.column, 3);
}

#[test]
fn services_count_errors_since_creation() {
    let session = Session::new();
    let ids = session.parse_file("r.src", "T: type = { }").unwrap();
    let t = session.type_declaration(ids[0]).unwrap();
    t.require(false, "before");

    let services = session.services();
    assert_eq!(services.errors_original_size(), 1);
    assert_eq!(services.new_error_count(), 0);
    t.require(false, "after");
    assert_eq!(services.new_error_count(), 1);
}

// =============================================================================
// parse_fragment
// =============================================================================

#[test]
fn fragments_are_kept_in_the_source_map() {
    let session = Session::new();
    let services = session.services();
    let decl = services.parse_fragment("f: (this) -> int;").unwrap();
    assert_eq!(decl.name, "f");

    assert!(services.parse_fragment("g: (this").is_none());

    session.with_sources(|sources| {
        assert_eq!(sources.generated_count(), 2);
        assert!(sources.iter().all(|s| s.origin() == SourceOrigin::Generated));
        assert!(sources.iter().all(|s| s.name() == "<generated>"));
    });
    assert_eq!(services.new_error_count(), 1);
}

#[test]
fn fragment_errors_point_into_the_fragment() {
    let session = Session::new();
    session.parse_file("main.src", "T: type = { }").unwrap();
    let services = session.services();
    assert!(services.parse_fragment("ok: int;\nbroken int;").is_none());

    let diagnostic = &session.diagnostics()[0];
    assert_eq!(diagnostic.position.line, 2);
    let line = session.with_sources(|s| s.line_text(diagnostic.position).map(String::from));
    assert_eq!(line.as_deref(), Some("broken int;"));
    assert_eq!(session.source_name(diagnostic.position.source).as_deref(), Some("<generated>"));
}

#[test]
fn configured_fragment_name() {
    let session =
        Session::with_config(SessionConfig::verbose().with_generated_source_name("<meta>"));
    assert!(session.services().parse_fragment("x: int;").is_some());
    session.with_sources(|sources| {
        assert_eq!(sources.iter().next().map(|s| s.name().to_string()).as_deref(), Some("<meta>"));
    });
}
