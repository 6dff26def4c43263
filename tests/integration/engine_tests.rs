//! Execution engine integration tests.
//!
//! Exercise fault isolation, determinism, selection handling and early
//! termination using scripted lints.

use crate::mocks::certificates::{recent, subscriber_cert};
use crate::mocks::lints::{
    descriptor, descriptor_from, CountingLint, NeverApplies, PanickingLint, PanickingPrecondition,
    ScriptedLint, SlowLint,
};
use certlint::engine::{LintOrchestrator, LintRegistry, LintSelection, OrchestratorConfig, RegistryError};
use certlint::{LintResult, LintSource, LintStatus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn orchestrator(registry: LintRegistry, config: OrchestratorConfig) -> LintOrchestrator {
    LintOrchestrator::new(Arc::new(registry), config)
}

fn sequential() -> OrchestratorConfig {
    OrchestratorConfig::default()
}

fn parallel() -> OrchestratorConfig {
    OrchestratorConfig {
        parallel: true,
        max_parallel: 4,
        ..Default::default()
    }
}

fn mixed_registry() -> LintRegistry {
    let mut registry = LintRegistry::new();
    registry
        .register(descriptor("e_passes"), ScriptedLint(LintResult::pass()))
        .unwrap();
    registry
        .register(descriptor("e_fails"), ScriptedLint(LintResult::error("bad field")))
        .unwrap();
    registry
        .register(descriptor("w_concern"), ScriptedLint(LintResult::warn("odd field")))
        .unwrap();
    registry.register(descriptor("e_panics"), PanickingLint).unwrap();
    registry.register(descriptor("e_not_relevant"), NeverApplies).unwrap();
    registry
}

#[test]
fn test_panicking_lint_becomes_fatal_and_others_complete() {
    let orch = orchestrator(mixed_registry(), sequential());
    let report = orch.run_all(&subscriber_cert(&["www.example.com"], recent()));

    assert_eq!(report.len(), 5);
    let fatal = report.get("e_panics").unwrap();
    assert_eq!(fatal.status, LintStatus::Fatal);
    assert!(fatal.details.as_deref().unwrap().contains("malformed extension"));

    assert_eq!(report.status("e_passes"), Some(LintStatus::Pass));
    assert_eq!(report.status("e_fails"), Some(LintStatus::Error));
    assert_eq!(report.status("w_concern"), Some(LintStatus::Warn));
    assert!(!report.partial);
}

#[test]
fn test_panic_in_precondition_is_contained() {
    let mut registry = LintRegistry::new();
    registry.register(descriptor("e_bad_precondition"), PanickingPrecondition).unwrap();
    registry
        .register(descriptor("e_fine"), ScriptedLint(LintResult::pass()))
        .unwrap();

    let report = orchestrator(registry, sequential()).run_all(&subscriber_cert(&[], recent()));
    assert_eq!(report.status("e_bad_precondition"), Some(LintStatus::Fatal));
    assert_eq!(report.status("e_fine"), Some(LintStatus::Pass));
}

#[test]
fn test_inapplicable_lint_is_recorded_not_executed() {
    let orch = orchestrator(mixed_registry(), sequential());
    let report = orch.run_all(&subscriber_cert(&[], recent()));

    let result = report.get("e_not_relevant").unwrap();
    assert_eq!(result.status, LintStatus::NotApplicable);
    assert!(result.details.as_deref().unwrap().contains("precondition"));
}

#[test]
fn test_runs_are_deterministic() {
    let orch = orchestrator(mixed_registry(), sequential());
    let cert = subscriber_cert(&["www.example.com"], recent());

    let first = orch.run_all(&cert);
    let second = orch.run_all(&cert);
    assert_eq!(first.results, second.results);
}

#[test]
fn test_parallel_matches_sequential() {
    let cert = subscriber_cert(&["www.example.com"], recent());
    let seq = orchestrator(mixed_registry(), sequential()).run_all(&cert);
    let par = orchestrator(mixed_registry(), parallel()).run_all(&cert);

    assert_eq!(seq.results, par.results);
    assert!(!par.partial);
}

#[test]
fn test_each_lint_executes_exactly_once() {
    for config in [sequential(), parallel()] {
        let mut registry = LintRegistry::new();
        let counters: Vec<CountingLint> = (0..16).map(|_| CountingLint::default()).collect();
        for (i, counter) in counters.iter().enumerate() {
            registry
                .register(descriptor(&format!("e_counted_{:02}", i)), counter.clone())
                .unwrap();
        }

        let report = orchestrator(registry, config).run_all(&subscriber_cert(&[], recent()));
        assert_eq!(report.len(), 16);
        for counter in &counters {
            assert_eq!(counter.applicability_checks(), 1);
            assert_eq!(counter.executions(), 1);
        }
    }
}

#[test]
fn test_lint_outside_window_is_never_invoked() {
    use crate::mocks::lints::descriptor_with_window;
    use certlint::data::dates::ymd;
    use certlint::engine::EffectiveWindow;

    let counter = CountingLint::default();
    let mut registry = LintRegistry::new();
    registry
        .register(
            descriptor_with_window("e_future_rule", EffectiveWindow::starting(ymd(2030, 1, 1))),
            counter.clone(),
        )
        .unwrap();

    let report = orchestrator(registry, sequential()).run_all(&subscriber_cert(&[], recent()));
    assert_eq!(report.status("e_future_rule"), Some(LintStatus::NotApplicable));
    assert_eq!(counter.applicability_checks(), 0);
    assert_eq!(counter.executions(), 0);
}

#[test]
fn test_unknown_name_fails_before_any_lint_runs() {
    let counter = CountingLint::default();
    let mut registry = LintRegistry::new();
    registry.register(descriptor("e_counted"), counter.clone()).unwrap();
    let orch = orchestrator(registry, sequential());

    let err = orch
        .run(
            &subscriber_cert(&[], recent()),
            &LintSelection::named(["e_counted", "e_typo"]),
        )
        .unwrap_err();

    assert_eq!(err, RegistryError::NotFound("e_typo".to_string()));
    assert_eq!(counter.executions(), 0);
}

#[test]
fn test_named_selection_runs_only_those_once() {
    let orch = orchestrator(mixed_registry(), sequential());
    let report = orch
        .run_specific(
            &subscriber_cert(&[], recent()),
            &["e_fails".to_string(), "e_passes".to_string(), "e_fails".to_string()],
        )
        .unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(report.status("e_fails"), Some(LintStatus::Error));
    assert!(report.get("w_concern").is_none());
}

#[test]
fn test_exclusion_ignores_unknown_names() {
    let orch = orchestrator(mixed_registry(), sequential());
    let report = orch.run_excluding(
        &subscriber_cert(&[], recent()),
        &["e_panics".to_string(), "e_does_not_exist".to_string()],
    );

    assert_eq!(report.len(), 4);
    assert!(report.get("e_panics").is_none());
}

#[test]
fn test_source_selection() {
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
    let orch = orchestrator(registry, sequential());

    let report = orch.run_sources(
        &subscriber_cert(&[], recent()),
        &[LintSource::CabfBaselineRequirements],
    );
    assert_eq!(report.iter().map(|(n, _)| n).collect::<Vec<_>>(), vec!["e_br"]);
}

#[test]
fn test_empty_selection_is_an_empty_report() {
    let orch = orchestrator(mixed_registry(), sequential());
    let report = orch
        .run(&subscriber_cert(&[], recent()), &LintSelection::Named(Vec::new()))
        .unwrap();
    assert!(report.is_empty());
    assert!(!report.partial);
}

#[test]
fn test_cancel_handle_stops_run_and_marks_partial() {
    let orch = orchestrator(mixed_registry(), sequential());
    let cert = subscriber_cert(&[], recent());

    orch.cancel_handle().store(true, Ordering::SeqCst);
    let report = orch.run(&cert, &LintSelection::All).unwrap();
    assert!(report.partial);
    assert!(report.is_empty());

    orch.reset_cancel();
    let report = orch.run(&cert, &LintSelection::All).unwrap();
    assert!(!report.partial);
    assert_eq!(report.len(), 5);
}

#[test]
fn test_per_run_cancel_flag() {
    let orch = orchestrator(mixed_registry(), parallel());
    let cancel = AtomicBool::new(true);
    let report = orch
        .run_cancellable(&subscriber_cert(&[], recent()), &LintSelection::All, &cancel)
        .unwrap();
    assert!(report.partial);
    assert!(report.is_empty());
}

#[test]
fn test_deadline_omits_unstarted_lints() {
    let mut registry = LintRegistry::new();
    for i in 0..5 {
        registry
            .register(
                descriptor(&format!("e_slow_{}", i)),
                SlowLint(Duration::from_millis(50)),
            )
            .unwrap();
    }
    let config = OrchestratorConfig {
        timeout_ms: 10,
        ..Default::default()
    };

    let report = orchestrator(registry, config).run_all(&subscriber_cert(&[], recent()));
    assert!(report.partial);
    // The first lint starts before the deadline and is allowed to finish
    assert_eq!(report.len(), 1);
    assert_eq!(report.status("e_slow_0"), Some(LintStatus::Pass));
}

#[test]
fn test_zero_timeout_is_unbounded() {
    let mut registry = LintRegistry::new();
    for i in 0..3 {
        registry
            .register(
                descriptor(&format!("e_slow_{}", i)),
                SlowLint(Duration::from_millis(5)),
            )
            .unwrap();
    }
    let config = OrchestratorConfig {
        timeout_ms: 0,
        ..Default::default()
    };

    let report = orchestrator(registry, config).run_all(&subscriber_cert(&[], recent()));
    assert!(!report.partial);
    assert_eq!(report.len(), 3);
}

#[test]
fn test_one_registry_serves_many_certificates() {
    use crate::mocks::lints::SubjectContains;

    let mut registry = LintRegistry::new();
    registry
        .register(descriptor("e_subject_marker"), SubjectContains("good"))
        .unwrap();
    let orch = orchestrator(registry, parallel());

    let good = subscriber_cert(&["good.example.com"], recent());
    let bad = subscriber_cert(&["other.example.com"], recent());
    assert_eq!(
        orch.run_all(&good).status("e_subject_marker"),
        Some(LintStatus::Pass)
    );
    assert_eq!(
        orch.run_all(&bad).status("e_subject_marker"),
        Some(LintStatus::Error)
    );
}

#[test]
fn test_combined_selection_matches_individual_runs() {
    let cert = subscriber_cert(&["www.example.com"], recent());

    for config in [sequential(), parallel()] {
        let mut registry = LintRegistry::new();
        registry
            .register(descriptor("e_a"), ScriptedLint(LintResult::error("bad field")))
            .unwrap();
        registry.register(descriptor("e_b"), PanickingLint).unwrap();
        let orch = orchestrator(registry, config);

        let a = orch.run(&cert, &LintSelection::named(["e_a"])).unwrap();
        let b = orch.run(&cert, &LintSelection::named(["e_b"])).unwrap();
        let both = orch.run(&cert, &LintSelection::named(["e_b", "e_a"])).unwrap();

        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
        assert_eq!(both.len(), 2);
        assert_eq!(a.get("e_a"), both.get("e_a"));
        assert_eq!(b.get("e_b"), both.get("e_b"));
        assert_eq!(both.status("e_a"), Some(LintStatus::Error));
        assert_eq!(both.status("e_b"), Some(LintStatus::Fatal));
    }
}
