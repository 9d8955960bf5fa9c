//! Integration tests for cross-layer functionality
//!
//! Tests complete compilations: parsing, meta-function dispatch, and the
//! `interface` rules as observed through printed output and diagnostics.

mod dispatch_flow;
mod interface_scenarios;
