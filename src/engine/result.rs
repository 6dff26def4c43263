//! Result aggregation and reporting.
//!
//! Collects per-lint results into a report keyed by lint name and computes
//! summary statistics.

use crate::{LintResult, LintStatus};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Result summary statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub passed: u32,
    pub warnings: u32,
    pub errors: u32,
    pub not_applicable: u32,
    pub fatal: u32,
    pub total: u32,
}

/// Results of one run over one certificate.
///
/// A `partial` report was cut short by a deadline or cancellation; lints that
/// never started are absent from `results`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LintReport {
    pub results: BTreeMap<String, LintResult>,
    pub partial: bool,
    pub duration_ms: u64,
}

impl LintReport {
    pub fn new() -> Self {
        LintReport::default()
    }

    pub fn get(&self, name: &str) -> Option<&LintResult> {
        self.results.get(name)
    }

    pub fn status(&self, name: &str) -> Option<LintStatus> {
        self.results.get(name).map(|r| r.status)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LintResult)> {
        self.results.iter().map(|(name, result)| (name.as_str(), result))
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Names of lints that ended with `status`, sorted.
    pub fn with_status(&self, status: LintStatus) -> Vec<&str> {
        self.iter()
            .filter(|(_, r)| r.status == status)
            .map(|(name, _)| name)
            .collect()
    }

    /// Check if any result is an error or fatal
    pub fn has_failures(&self) -> bool {
        self.results
            .values()
            .any(|r| matches!(r.status, LintStatus::Error | LintStatus::Fatal))
    }

    /// Most severe status in the report.
    pub fn worst_status(&self) -> Option<LintStatus> {
        self.results.values().map(|r| r.status).max()
    }

    /// Calculate summary statistics
    pub fn summary(&self) -> ResultSummary {
        let mut summary = ResultSummary::default();

        for result in self.results.values() {
            summary.total += 1;
            match result.status {
                LintStatus::Pass => summary.passed += 1,
                LintStatus::Warn => summary.warnings += 1,
                LintStatus::Error => summary.errors += 1,
                LintStatus::NotApplicable => summary.not_applicable += 1,
                LintStatus::Fatal => summary.fatal += 1,
            }
        }

        summary
    }
}

/// Collects results while a run is in progress.
///
/// Insertion is keyed by lint name. Registry uniqueness means a name never
/// arrives twice; if it does, the first result is kept.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    results: HashMap<String, LintResult>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        ResultAggregator::default()
    }

    /// Add a completed result. Returns false if `name` was already present.
    pub fn add_result(&mut self, name: &str, result: LintResult) -> bool {
        if self.results.contains_key(name) {
            tracing::error!(lint = %name, "lint produced more than one result; keeping the first");
            return false;
        }
        self.results.insert(name.to_string(), result);
        true
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Create final report
    pub fn into_report(self, partial: bool, duration_ms: u64) -> LintReport {
        LintReport {
            results: self.results.into_iter().collect(),
            partial,
            duration_ms,
        }
    }
}
