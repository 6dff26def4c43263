//! Integration tests for certlint.
//!
//! These tests drive the registry and engine with scripted lints, and the
//! lint corpus with in-memory and generated certificates.

pub mod config_tests;
pub mod engine_tests;
pub mod output_tests;
pub mod registry_tests;
