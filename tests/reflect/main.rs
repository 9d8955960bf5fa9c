//! Integration tests for Layer 2: Reflect
//!
//! Tests for compiler services, declaration views, and the registry.

mod registry;
mod services;
mod views;
