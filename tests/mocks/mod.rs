//! Test fixtures.
//!
//! - `certificates`: in-memory `Certificate` values
//! - `der`: generated DER/PEM certificates for the parser
//! - `lints`: scripted lints for engine tests

#![allow(dead_code)]
