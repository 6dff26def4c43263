//! Lint execution orchestrator.
//!
//! Resolves a lint selection against the registry and runs every selected
//! lint exactly once over one certificate, sequentially or on a rayon pool.
//!
//! # Graceful Degradation
//!
//! This module handles errors gracefully:
//! - Lint panics: Caught via std::panic::catch_unwind, converted to a Fatal result
//! - Lint outside its effective window: Recorded as NotApplicable
//! - Lint precondition not met: Recorded as NotApplicable
//! - Deadline or cancellation: Lints not yet started are omitted and the
//!   report is marked partial (a valid result, not an error)
//! - Unknown lint name in a named selection: RegistryError::NotFound, before any lint runs
//! - Unknown lint name in an exclusion list: Ignored
//! - Empty selection: Returns empty report (not an error)
//!
//! One lint's outcome never affects another's; lints cannot observe each
//! other's results.

use crate::certificate::Certificate;
use crate::engine::effective::is_in_scope;
use crate::engine::lint::RegisteredLint;
use crate::engine::registry::{LintRegistry, RegistryError};
use crate::engine::result::{LintReport, ResultAggregator};
use crate::{LintResult, LintSource, LintStatus};
use rayon::prelude::*;
use std::any::Any;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Orchestrator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Run lints on a worker pool instead of the calling thread
    pub parallel: bool,
    /// Bound on a single run in milliseconds (0 = unbounded)
    pub timeout_ms: u64,
    /// Worker threads used when `parallel` is set
    pub max_parallel: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        OrchestratorConfig {
            parallel: false,
            timeout_ms: 30000,
            max_parallel: 4,
        }
    }
}

/// Which registered lints a run should consider.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LintSelection {
    /// Every registered lint
    #[default]
    All,
    /// Exactly these lints; every name must be registered
    Named(Vec<String>),
    /// Every registered lint except these
    Excluding(Vec<String>),
    /// Lints drawn from any of these standards
    Sources(Vec<LintSource>),
}

impl LintSelection {
    pub fn named<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LintSelection::Named(names.into_iter().map(Into::into).collect())
    }
}

/// Lint orchestrator
pub struct LintOrchestrator {
    config: OrchestratorConfig,
    registry: Arc<LintRegistry>,
    pool: Option<rayon::ThreadPool>,
    cancel: Arc<AtomicBool>,
}

impl LintOrchestrator {
    /// Create a new orchestrator over a fully populated registry
    pub fn new(registry: Arc<LintRegistry>, config: OrchestratorConfig) -> Self {
        let pool = if config.parallel {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(config.max_parallel.max(1))
                .thread_name(|i| format!("certlint-worker-{}", i))
                .build()
            {
                Ok(pool) => Some(pool),
                Err(e) => {
                    tracing::warn!("could not start lint worker pool, running sequentially: {}", e);
                    None
                }
            }
        } else {
            None
        };

        LintOrchestrator {
            config,
            registry,
            pool,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that stops runs on this orchestrator when set. Lints already
    /// executing finish; the rest are skipped. The flag stays set until
    /// `reset_cancel` is called.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn reset_cancel(&self) {
        self.cancel.store(false, Ordering::Relaxed);
    }

    pub fn registry(&self) -> &LintRegistry {
        &self.registry
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Run the selected lints over `cert`.
    pub fn run(
        &self,
        cert: &Certificate,
        selection: &LintSelection,
    ) -> Result<LintReport, RegistryError> {
        self.run_cancellable(cert, selection, &self.cancel)
    }

    /// Like `run`, but watches a caller-owned flag instead of the
    /// orchestrator's own. Lints not yet started once either flag is set are
    /// skipped and the report is marked partial.
    pub fn run_cancellable(
        &self,
        cert: &Certificate,
        selection: &LintSelection,
        cancel: &AtomicBool,
    ) -> Result<LintReport, RegistryError> {
        let lints = self.resolve(selection)?;
        Ok(self.execute_lints(cert, &lints, cancel))
    }

    /// Run all registered lints
    pub fn run_all(&self, cert: &Certificate) -> LintReport {
        let lints: Vec<&RegisteredLint> = self.registry.iter().collect();
        self.execute_lints(cert, &lints, &self.cancel)
    }

    /// Run specific lints by name
    pub fn run_specific(
        &self,
        cert: &Certificate,
        names: &[String],
    ) -> Result<LintReport, RegistryError> {
        self.run(cert, &LintSelection::Named(names.to_vec()))
    }

    /// Run all lints except the named ones
    pub fn run_excluding(&self, cert: &Certificate, skip: &[String]) -> LintReport {
        let lints = self.excluding(skip);
        self.execute_lints(cert, &lints, &self.cancel)
    }

    /// Run lints drawn from the given standards
    pub fn run_sources(&self, cert: &Certificate, sources: &[LintSource]) -> LintReport {
        let lints = self.from_sources(sources);
        self.execute_lints(cert, &lints, &self.cancel)
    }

    /// Lints a selection refers to, in registry order (named selections keep
    /// the caller's order, without repeats).
    pub fn resolve(&self, selection: &LintSelection) -> Result<Vec<&RegisteredLint>, RegistryError> {
        match selection {
            LintSelection::All => Ok(self.registry.iter().collect()),
            LintSelection::Named(names) => {
                let mut seen = HashSet::new();
                let mut lints = Vec::with_capacity(names.len());
                for name in names {
                    if seen.insert(name.as_str()) {
                        lints.push(self.registry.get(name)?);
                    }
                }
                Ok(lints)
            }
            LintSelection::Excluding(skip) => Ok(self.excluding(skip)),
            LintSelection::Sources(sources) => Ok(self.from_sources(sources)),
        }
    }

    fn excluding(&self, skip: &[String]) -> Vec<&RegisteredLint> {
        self.registry
            .iter()
            .filter(|l| !skip.iter().any(|s| s == l.name()))
            .collect()
    }

    fn from_sources(&self, sources: &[LintSource]) -> Vec<&RegisteredLint> {
        self.registry
            .iter()
            .filter(|l| sources.contains(&l.descriptor.source))
            .collect()
    }

    /// Execute the given lints
    fn execute_lints(
        &self,
        cert: &Certificate,
        lints: &[&RegisteredLint],
        cancel: &AtomicBool,
    ) -> LintReport {
        let start = Instant::now();
        let deadline = (self.config.timeout_ms > 0)
            .then(|| start + Duration::from_millis(self.config.timeout_ms));
        let aggregator = Mutex::new(ResultAggregator::new());
        let stopped = AtomicBool::new(false);

        let run_one = |lint: &RegisteredLint| {
            let expired = deadline.map_or(false, |d| Instant::now() >= d);
            if expired || cancel.load(Ordering::Relaxed) || self.cancel.load(Ordering::Relaxed) {
                stopped.store(true, Ordering::Relaxed);
                return;
            }
            let result = evaluate(lint, cert);
            record(&aggregator, lint.name(), result);
        };

        match &self.pool {
            Some(pool) if lints.len() > 1 => {
                pool.install(|| lints.par_iter().for_each(|lint| run_one(*lint)));
            }
            _ => lints.iter().for_each(|lint| run_one(*lint)),
        }

        // Recover the data even if a lock holder panicked
        let aggregator = match aggregator.into_inner() {
            Ok(agg) => agg,
            Err(poisoned) => poisoned.into_inner(),
        };

        let partial = stopped.load(Ordering::Relaxed);
        let duration_ms = start.elapsed().as_millis() as u64;
        if partial {
            tracing::warn!(
                completed = aggregator.len(),
                selected = lints.len(),
                "lint run stopped early; report is partial"
            );
        }
        tracing::info!(lints = aggregator.len(), duration_ms, "lint run complete");

        aggregator.into_report(partial, duration_ms)
    }
}

/// Evaluate one lint against one certificate: effective window, then
/// applicability, then execution, with panics contained.
pub(crate) fn evaluate(lint: &RegisteredLint, cert: &Certificate) -> LintResult {
    let descriptor = &lint.descriptor;

    if !is_in_scope(&descriptor.effective, cert.not_before) {
        tracing::debug!(lint = %descriptor.name, "certificate outside effective window");
        return LintResult::not_applicable(format!(
            "certificate issued {} is outside effective window {}",
            cert.not_before.format("%Y-%m-%d"),
            descriptor.effective
        ));
    }

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        if lint.lint.check_applies(cert) {
            Some(lint.lint.execute(cert))
        } else {
            None
        }
    }));

    match outcome {
        Ok(Some(result)) => {
            if result.status == LintStatus::Fatal {
                tracing::warn!(lint = %descriptor.name, "lint could not complete: {}", result);
            }
            result
        }
        Ok(None) => {
            tracing::debug!(lint = %descriptor.name, "lint does not apply");
            LintResult::not_applicable("certificate does not meet the lint's precondition")
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::warn!(lint = %descriptor.name, "lint panicked: {}", message);
            LintResult::fatal(format!("lint panicked: {}", message))
        }
    }
}

fn record(aggregator: &Mutex<ResultAggregator>, name: &str, result: LintResult) {
    match aggregator.lock() {
        Ok(mut agg) => {
            agg.add_result(name, result);
        }
        Err(poisoned) => {
            poisoned.into_inner().add_result(name, result);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
