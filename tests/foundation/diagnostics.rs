//! Integration tests for the diagnostic sink
//!
//! Tests recording order, marks, severities, and rendering.

use metaform_foundation::{Diagnostic, DiagnosticSink, Severity, SourceId, SourcePosition};

fn at(line: u32, column: u32) -> SourcePosition {
    SourcePosition::new(SourceId::new(0), line, column)
}

// =============================================================================
// Recording
// =============================================================================

#[test]
fn records_keep_emission_order() {
    let mut sink = DiagnosticSink::new();
    sink.error(at(3, 1), "third line");
    sink.error(at(1, 1), "first line");
    let messages: Vec<_> = sink.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(messages, ["third line", "first line"]);
    assert_eq!(sink.len(), 2);
}

#[test]
fn push_accepts_prebuilt_records() {
    let mut sink = DiagnosticSink::new();
    assert!(sink.is_empty());
    sink.push(Diagnostic::fatal(at(1, 5), "stop"));
    assert_eq!(sink.last().map(|d| d.severity), Some(Severity::Fatal));
    assert!(sink.has_fatal());
}

// =============================================================================
// Marks
// =============================================================================

#[test]
fn mark_counts_later_records() {
    let mut sink = DiagnosticSink::new();
    sink.error(at(1, 1), "before");
    let mark = sink.mark();
    assert_eq!(mark.len(), 1);
    assert_eq!(sink.count_since(mark), 0);

    sink.error(at(2, 1), "after one");
    sink.error(at(3, 1), "after two");
    assert_eq!(sink.count_since(mark), 2);
    assert_eq!(sink.since(mark)[0].message, "after one");
}

#[test]
fn message_search() {
    let mut sink = DiagnosticSink::new();
    sink.error(at(1, 1), "interfaces may not contain data objects");
    sink.error(at(2, 1), "interfaces may not contain data objects");
    sink.error(at(3, 1), "interface functions must be public");
    assert!(sink.contains_message("must be public"));
    assert_eq!(sink.count_matching("data objects"), 2);
    assert!(!sink.contains_message("destructor"));
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn severity_labels() {
    assert_eq!(Severity::Error.as_str(), "error");
    assert_eq!(Severity::Fatal.as_str(), "fatal error");
    assert!(Severity::Fatal.is_fatal());
    assert!(!Severity::Error.is_fatal());
}

#[test]
fn diagnostic_display() {
    let d = Diagnostic::fatal(at(2, 4), "hard stop");
    assert_eq!(d.to_string(), "2:4: fatal error: hard stop");
}

#[test]
fn unknown_position_display() {
    let d = Diagnostic::error(SourcePosition::default(), "somewhere");
    assert!(!d.position.is_known());
    assert_eq!(d.to_string(), "?: error: somewhere");
}
