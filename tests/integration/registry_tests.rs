//! Registry integration tests.

use crate::mocks::lints::{descriptor, descriptor_from, FailingInit, ScriptedLint};
use certlint::data::dates::ymd;
use certlint::engine::{EffectiveWindow, LintRegistry, RegistryError};
use certlint::lints;
use certlint::{LintResult, LintSource};
use std::collections::HashSet;

#[test]
fn test_duplicate_registration_is_rejected_and_first_kept() {
    let mut registry = LintRegistry::new();
    registry
        .register(descriptor("e_same"), ScriptedLint(LintResult::pass()))
        .unwrap();

    let err = registry
        .register(descriptor("e_same"), ScriptedLint(LintResult::error("second")))
        .unwrap_err();

    assert_eq!(err, RegistryError::DuplicateName("e_same".to_string()));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_whitespace_in_name_is_rejected() {
    let mut registry = LintRegistry::new();
    let err = registry
        .register(descriptor("e_two words"), ScriptedLint(LintResult::pass()))
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidName { .. }));
}

#[test]
fn test_empty_window_is_rejected() {
    let mut registry = LintRegistry::new();
    let mut d = descriptor("e_backwards");
    d.effective = EffectiveWindow::between(ymd(2020, 1, 1), ymd(2019, 1, 1));

    let err = registry
        .register(d, ScriptedLint(LintResult::pass()))
        .unwrap_err();
    assert!(matches!(err, RegistryError::EmptyWindow { .. }));
}

#[test]
fn test_initialize_failure_surfaces_at_registration() {
    let mut registry = LintRegistry::new();
    let err = registry.register(descriptor("e_needs_table"), FailingInit).unwrap_err();
    assert_eq!(
        err.to_string(),
        "lint 'e_needs_table' failed to initialize: reference table unavailable"
    );
}

#[test]
fn test_by_source_filters() {
    let mut registry = LintRegistry::new();
    registry
        .register(
            descriptor_from("e_profile", LintSource::Rfc5280),
            ScriptedLint(LintResult::pass()),
        )
        .unwrap();
    registry
        .register(
            descriptor_from("e_br", LintSource::CabfBaselineRequirements),
            ScriptedLint(LintResult::pass()),
        )
        .unwrap();

    let br: Vec<_> = registry
        .by_source(LintSource::CabfBaselineRequirements)
        .map(|l| l.name())
        .collect();
    assert_eq!(br, vec!["e_br"]);
    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["e_profile", "e_br"]);
}

#[test]
fn test_corpus_registers_cleanly_with_unique_names() {
    let registry = lints::default_registry().unwrap();
    assert_eq!(registry.len(), 12);

    let names: HashSet<_> = registry.names().collect();
    assert_eq!(names.len(), registry.len());
    assert!(registry.contains("e_cert_contains_unique_identifier"));
    assert!(registry.contains("e_dnsname_underscore_in_sld"));
}

#[test]
fn test_registering_the_corpus_twice_fails() {
    let mut registry = lints::default_registry().unwrap();
    let err = lints::register_all(&mut registry).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateName(_)));
    assert_eq!(registry.len(), 12);
}

#[test]
fn test_corpus_descriptors_are_complete() {
    let registry = lints::default_registry().unwrap();
    for lint in &registry {
        let d = &lint.descriptor;
        assert!(!d.description.is_empty(), "{} has no description", d.name);
        assert!(!d.citation.is_empty(), "{} has no citation", d.name);
        assert!(d.name.starts_with(d.severity.name_prefix()));
    }
}
