//! Lint registry.
//!
//! The registry is built once by the process entry point: every lint
//! module's `register` function is called in a fixed order, after which the
//! registry is shared read-only (typically behind an `Arc`) for the rest of
//! the process. Registration problems are configuration errors and surface
//! here, before any certificate is linted.

use crate::engine::lint::{Lint, LintDescriptor, RegisteredLint};
use crate::LintSource;
use std::collections::HashMap;

/// Configuration errors detected while building the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("lint '{0}' is already registered")]
    DuplicateName(String),

    #[error("lint '{0}' is not registered")]
    NotFound(String),

    #[error("invalid lint name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("lint '{name}' has an empty effective window {window}")]
    EmptyWindow { name: String, window: String },

    #[error("lint '{name}' failed to initialize: {reason}")]
    Initialization { name: String, reason: String },
}

/// Catalog of lints keyed by unique name, kept in registration order.
#[derive(Debug, Default)]
pub struct LintRegistry {
    lints: Vec<RegisteredLint>,
    index: HashMap<String, usize>,
}

impl LintRegistry {
    pub fn new() -> Self {
        LintRegistry::default()
    }

    /// Validate, initialize and add a lint.
    ///
    /// A second registration under an existing name is rejected and the
    /// first registration is kept.
    pub fn register(
        &mut self,
        descriptor: LintDescriptor,
        lint: impl Lint + 'static,
    ) -> Result<(), RegistryError> {
        self.register_boxed(descriptor, Box::new(lint))
    }

    pub fn register_boxed(
        &mut self,
        descriptor: LintDescriptor,
        mut lint: Box<dyn Lint>,
    ) -> Result<(), RegistryError> {
        let name = descriptor.name.clone();

        if self.index.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        validate_name(&descriptor)?;
        if descriptor.effective.is_empty() {
            return Err(RegistryError::EmptyWindow {
                name,
                window: descriptor.effective.to_string(),
            });
        }

        lint.initialize()
            .map_err(|e| RegistryError::Initialization {
                name: name.clone(),
                reason: e.to_string(),
            })?;

        tracing::debug!(lint = %name, source = %descriptor.source.as_str(), "registered lint");
        self.index.insert(name, self.lints.len());
        self.lints.push(RegisteredLint { descriptor, lint });
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&RegisteredLint> {
        self.index.get(name).and_then(|&i| self.lints.get(i))
    }

    /// Like `lookup`, but a missing name is an error.
    pub fn get(&self, name: &str) -> Result<&RegisteredLint, RegistryError> {
        self.lookup(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All lints in registration order. The iterator can be cloned to
    /// restart it.
    pub fn iter(&self) -> std::slice::Iter<'_, RegisteredLint> {
        self.lints.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.lints.iter().map(|l| l.name())
    }

    pub fn by_source(&self, source: LintSource) -> impl Iterator<Item = &RegisteredLint> + '_ {
        self.lints
            .iter()
            .filter(move |l| l.descriptor.source == source)
    }

    pub fn len(&self) -> usize {
        self.lints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lints.is_empty()
    }
}

impl<'a> IntoIterator for &'a LintRegistry {
    type Item = &'a RegisteredLint;
    type IntoIter = std::slice::Iter<'a, RegisteredLint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Names are non-empty, carry no whitespace, and start with the prefix of
/// their default severity (`e_` or `w_`).
fn validate_name(descriptor: &LintDescriptor) -> Result<(), RegistryError> {
    let name = &descriptor.name;
    let invalid = |reason: String| RegistryError::InvalidName {
        name: name.clone(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("name is empty".to_string()));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(invalid("name contains whitespace".to_string()));
    }

    let prefix = descriptor.severity.name_prefix();
    if !name.starts_with(prefix) {
        return Err(invalid(format!(
            "{} lints must be named with the '{}' prefix",
            descriptor.severity, prefix
        )));
    }
    Ok(())
}
