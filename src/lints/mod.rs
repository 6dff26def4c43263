//! Lint corpus.
//!
//! Lints are grouped by the standard they enforce:
//! - RFC 5280: structural profile requirements
//! - CA/B Forum Baseline Requirements: publicly-trusted TLS requirements
//!
//! Each module exposes a `register` function adding its lints to a
//! registry. Adding a lint means writing the type, its descriptor, and one
//! `register` call in the module for its standard.
//!
//! Lints never panic on malformed input; a condition a lint cannot judge is
//! returned as a Fatal result.

pub mod cabf_br;
pub mod rfc5280;
pub mod util;

use crate::engine::registry::{LintRegistry, RegistryError};

/// Register every lint in the corpus, in a fixed order
pub fn register_all(registry: &mut LintRegistry) -> Result<(), RegistryError> {
    rfc5280::register(registry)?;
    cabf_br::register(registry)?;
    Ok(())
}

/// Build a registry holding the whole corpus
pub fn default_registry() -> Result<LintRegistry, RegistryError> {
    let mut registry = LintRegistry::new();
    register_all(&mut registry)?;
    Ok(registry)
}
