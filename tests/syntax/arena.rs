//! Integration tests for the declaration arena

use metaform_syntax::{Access, DeclArena, DeclId, MemberFilter, parse, parse_one};

fn arena_with(src: &str) -> DeclArena {
    let mut arena = DeclArena::new();
    for decl in parse(src).unwrap() {
        arena.alloc_root(decl);
    }
    arena
}

// =============================================================================
// Structure
// =============================================================================

#[test]
fn members_link_to_parents() {
    let arena = arena_with("T: type = { f: (this); x: int; }");
    let t = arena.roots()[0];
    for &member in arena[t].members() {
        assert_eq!(arena[member].parent, Some(t));
        assert!(arena.parent_is_type(member));
        assert!(!arena[member].is_global());
    }
    assert!(arena[t].is_global());
}

#[test]
fn member_filters() {
    let arena = arena_with("T: type = { f: (this); x: int; I: type = { } }");
    let t = arena.roots()[0];
    assert_eq!(arena.type_scope_declarations(t, MemberFilter::All).len(), 3);
    assert_eq!(arena.type_scope_declarations(t, MemberFilter::Functions).len(), 1);
    assert_eq!(arena.type_scope_declarations(t, MemberFilter::Objects).len(), 1);
    assert_eq!(arena.type_scope_declarations(t, MemberFilter::Types).len(), 1);
    let f = arena[t].members()[0];
    assert!(arena.type_scope_declarations(f, MemberFilter::All).is_empty());
}

#[test]
fn preorder_types_visit_outer_first() {
    let arena = arena_with("A: type = { B: type = { C: type = { } } } D: type = { }");
    let names: Vec<_> = arena
        .preorder_types()
        .into_iter()
        .filter_map(|id| arena[id].name().map(String::from))
        .collect();
    assert_eq!(names, ["A", "B", "C", "D"]);
}

#[test]
fn add_type_member_only_on_types() {
    let mut arena = arena_with("T: type = { } f: (this);");
    let t = arena.roots()[0];
    let f = arena.roots()[1];
    let added = arena.add_type_member(t, parse_one("g: (this);").unwrap()).unwrap();
    assert_eq!(arena[t].members(), [added]);
    assert!(arena.add_type_member(f, parse_one("g: (this);").unwrap()).is_none());
    assert!(arena.get(DeclId::new(1000)).is_none());
}

// =============================================================================
// Mutation
// =============================================================================

#[test]
fn access_changes_only_from_default() {
    let mut arena = arena_with("T: type = { f: (this); private g: (this); }");
    let t = arena.roots()[0];
    let (f, g) = (arena[t].members()[0], arena[t].members()[1]);

    assert!(arena.set_access(f, Access::Public));
    assert!(arena[f].is_public());
    assert!(arena.set_access(f, Access::Public));
    assert!(!arena.set_access(f, Access::Private));

    assert!(!arena.set_access(g, Access::Public));
    assert!(arena.set_access(g, Access::Private));
}

#[test]
fn access_needs_an_enclosing_type() {
    let mut arena = arena_with("f: (this); ns: namespace = { g: (this); }");
    let f = arena.roots()[0];
    let ns = arena.roots()[1];
    let g = arena[ns].members()[0];
    assert!(!arena.set_access(f, Access::Public));
    assert!(!arena.set_access(ns, Access::Public));
    assert!(!arena.set_access(g, Access::Public));
    assert!(arena[g].is_default_access());
}

#[test]
fn virtual_needs_this() {
    let mut arena = arena_with("T: type = { f: (this); s: (x: int); o: (override this); }");
    let t = arena.roots()[0];
    let members = arena[t].members().to_vec();

    assert!(arena.make_function_virtual(members[0]));
    assert!(arena[members[0]].is_virtual_function());
    assert!(!arena.make_function_virtual(members[1]));
    assert!(!arena[members[1]].is_virtual_function());
    assert!(arena.make_function_virtual(members[2]));
    assert_eq!(arena[members[2]].params()[0].to_string(), "override this");
}

// =============================================================================
// Type Queries
// =============================================================================

#[test]
fn polymorphic_through_base_subobject() {
    let arena = arena_with(
        "Base: type = { f: (virtual this); }
         Mid: type = { this: Base; }
         Leaf: type = { this: Mid; }
         Loop: type = { this: Loop; }",
    );
    let ids: Vec<_> = ["Base", "Mid", "Leaf", "Loop"]
        .iter()
        .map(|n| arena.type_named(n).unwrap())
        .collect();
    assert!(arena.is_polymorphic(ids[0]));
    assert!(arena.is_polymorphic(ids[1]));
    assert!(arena.is_polymorphic(ids[2]));
    assert!(!arena.is_polymorphic(ids[3]));
}

#[test]
fn declared_that_functions() {
    let arena = arena_with(
        "T: type = {
            operator=: (out this, that) = { }
            operator=: (inout this, move that) = { }
        }",
    );
    let found = arena.find_declared_that_functions(arena.roots()[0]);
    assert!(found.out_this_in_that);
    assert!(!found.out_this_move_that);
    assert!(!found.inout_this_in_that);
    assert!(found.inout_this_move_that);
}
