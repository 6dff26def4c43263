//! Command handlers for certlint
//!
//! - `lint`: lint certificate files and render reports
//! - `list`: print the lint catalog

pub mod lint;
pub mod list;
