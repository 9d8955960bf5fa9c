//! Integration tests for Layer 0: Foundation
//!
//! Tests for errors, source positions, and the diagnostic sink.

mod diagnostics;
