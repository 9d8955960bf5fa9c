//! Integration tests for the lexer and source map

use metaform_foundation::{SourceId, SourcePosition};
use metaform_syntax::{Lexer, SourceMap, SourceOrigin, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::tokenize_all(source, SourceId::new(0))
        .into_iter()
        .map(|t| t.kind)
        .filter(|k| !k.is_trivia())
        .collect()
}

// =============================================================================
// Tokens
// =============================================================================

#[test]
fn object_declaration_tokens() {
    assert_eq!(
        kinds("x: int;"),
        vec![
            TokenKind::Identifier("x".into()),
            TokenKind::Colon,
            TokenKind::Identifier("int".into()),
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn compound_punctuation() {
    assert_eq!(
        kinds(":: -> == = : -"),
        vec![
            TokenKind::ColonColon,
            TokenKind::Arrow,
            TokenKind::EqualEqual,
            TokenKind::Assign,
            TokenKind::Colon,
            TokenKind::Minus,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn meta_function_marker() {
    let ks = kinds("@interface");
    assert_eq!(ks[0], TokenKind::At);
    assert_eq!(ks[1], TokenKind::Identifier("interface".into()));
}

#[test]
fn comments_are_trivia() {
    let all = Lexer::tokenize_all("// note\nx /* inline */", SourceId::new(0));
    assert!(all.iter().any(|t| t.kind.is_trivia()));
    assert_eq!(kinds("// note\nx /* inline */").len(), 2);
}

#[test]
fn token_positions_are_one_based() {
    let tokens = Lexer::tokenize_all("a:\n  b", SourceId::new(3));
    let b = tokens.iter().find(|t| t.is_identifier("b")).unwrap();
    assert_eq!(b.span.line, 2);
    assert_eq!(b.span.column, 3);
    assert_eq!(b.span.position(), SourcePosition::new(SourceId::new(3), 2, 3));
}

// =============================================================================
// Source Map
// =============================================================================

#[test]
fn source_map_keeps_every_source() {
    let mut map = SourceMap::new();
    let file = map.add_file("main.src", "T: type = { }");
    let fragment = map.add_generated("<generated>", "f: (this);");

    assert_eq!(map.len(), 2);
    assert_eq!(map.generated_count(), 1);
    assert_eq!(map[file].origin(), SourceOrigin::File);
    assert_eq!(map[fragment].origin(), SourceOrigin::Generated);
    assert_eq!(map[fragment].text(), "f: (this);");
    assert_eq!(map[fragment].tokens().last().map(|t| &t.kind), Some(&TokenKind::Eof));
}

#[test]
fn source_map_line_lookup() {
    let mut map = SourceMap::new();
    let id = map.add_file("two.src", "first\nsecond\n");
    assert_eq!(map[id].lines().len(), 2);
    assert_eq!(map.line_text(SourcePosition::new(id, 2, 1)), Some("second"));
    assert_eq!(map.line_text(SourcePosition::new(id, 3, 1)), None);
    assert!(map.get(SourceId::UNKNOWN).is_none());
}
