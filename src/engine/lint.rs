//! Lint contract and descriptor.

use crate::certificate::Certificate;
use crate::engine::effective::EffectiveWindow;
use crate::{LintResult, LintSource, Severity};
use serde::Serialize;
use std::fmt;

/// Raised by `Lint::initialize` when a lint cannot build its state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ConfigurationError(pub String);

/// A single compliance check.
///
/// Implementations must be pure functions of the certificate: no shared
/// mutable state, no dependence on other lints or on call order.
pub trait Lint: Send + Sync {
    /// One-time setup, called by the registry before the lint is usable.
    fn initialize(&mut self) -> Result<(), ConfigurationError> {
        Ok(())
    }

    /// Whether the certificate has the structure this lint inspects.
    fn check_applies(&self, cert: &Certificate) -> bool;

    /// Judge the certificate. Only called when `check_applies` returned
    /// true and the certificate falls inside the effective window.
    fn execute(&self, cert: &Certificate) -> LintResult;
}

/// Metadata describing a registered lint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintDescriptor {
    /// Globally unique, stable identifier (e.g., "e_cert_contains_unique_identifier")
    pub name: String,
    pub description: String,
    /// Section of the source standard (e.g., "RFC 5280: 4.1.2.8")
    pub citation: String,
    pub source: LintSource,
    pub effective: EffectiveWindow,
    pub severity: Severity,
}

/// A lint together with its descriptor, as stored in the registry.
pub struct RegisteredLint {
    pub descriptor: LintDescriptor,
    pub lint: Box<dyn Lint>,
}

impl RegisteredLint {
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
}

impl fmt::Debug for RegisteredLint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredLint")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}
