//! certlint library
//!
//! X.509 certificate compliance linting against RFC 5280 and the
//! CA/Browser Forum Baseline Requirements.
//!
//! This library provides:
//! - A registry of independently authored lints, populated once at startup
//! - An execution engine that runs selected lints over one certificate,
//!   isolating faults and honoring each lint's effective-date window
//! - A starter lint corpus (`lints`) and a PEM/DER input adapter
//!   (`certificate::parser`)
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use certlint::certificate::parse_cert;
//! use certlint::engine::{LintOrchestrator, LintRegistry, LintSelection, OrchestratorConfig};
//!
//! let mut registry = LintRegistry::new();
//! certlint::lints::register_all(&mut registry).expect("lint registration failed");
//!
//! let orchestrator = LintOrchestrator::new(Arc::new(registry), OrchestratorConfig::default());
//! let der = std::fs::read("leaf.der").unwrap();
//! let cert = parse_cert(&der).unwrap();
//! let report = orchestrator.run(&cert, &LintSelection::All).unwrap();
//! println!("Errors: {}", report.summary().errors);
//! ```

pub mod certificate;
pub mod cli;
pub mod commands;
pub mod config;
pub mod data;
pub mod engine;
pub mod lints;
pub mod version;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use certificate::{Certificate, ParseError};
pub use config::{ConfigError, LintConfig};
pub use engine::registry::RegistryError;
pub use engine::result::{LintReport, ResultSummary};

/// Outcome of running one lint against one certificate.
///
/// Ordered by how loudly a reporter should surface it, so the worst status
/// in a report is simply the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LintStatus {
    /// The lint's precondition or effective window did not hold; nothing was checked
    #[serde(rename = "na")]
    NotApplicable,
    /// The condition was checked and satisfied
    #[serde(rename = "pass")]
    Pass,
    /// Compliance concern that is not a hard failure
    #[serde(rename = "warn")]
    Warn,
    /// Definite standards breach
    #[serde(rename = "error")]
    Error,
    /// The lint itself could not complete
    #[serde(rename = "fatal")]
    Fatal,
}

impl LintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LintStatus::NotApplicable => "na",
            LintStatus::Pass => "pass",
            LintStatus::Warn => "warn",
            LintStatus::Error => "error",
            LintStatus::Fatal => "fatal",
        }
    }
}

impl fmt::Display for LintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintStatus::NotApplicable => write!(f, "N/A"),
            LintStatus::Pass => write!(f, "PASS"),
            LintStatus::Warn => write!(f, "WARN"),
            LintStatus::Error => write!(f, "ERROR"),
            LintStatus::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Result of a single lint invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintResult {
    pub status: LintStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl LintResult {
    pub fn new(status: LintStatus, details: Option<String>) -> Self {
        LintResult { status, details }
    }

    pub fn pass() -> Self {
        LintResult::new(LintStatus::Pass, None)
    }

    pub fn error(details: impl Into<String>) -> Self {
        LintResult::new(LintStatus::Error, Some(details.into()))
    }

    pub fn warn(details: impl Into<String>) -> Self {
        LintResult::new(LintStatus::Warn, Some(details.into()))
    }

    pub fn not_applicable(details: impl Into<String>) -> Self {
        LintResult::new(LintStatus::NotApplicable, Some(details.into()))
    }

    pub fn fatal(details: impl Into<String>) -> Self {
        LintResult::new(LintStatus::Fatal, Some(details.into()))
    }

    /// Violation reported at the given severity.
    pub fn violation(severity: Severity, details: impl Into<String>) -> Self {
        match severity {
            Severity::Error => LintResult::error(details),
            Severity::Warn => LintResult::warn(details),
        }
    }
}

impl fmt::Display for LintResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{}: {}", self.status, details),
            None => write!(f, "{}", self.status),
        }
    }
}

/// Default severity of a lint's violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warn,
    Error,
}

impl Severity {
    /// Name prefix lints of this severity carry (`e_` or `w_`).
    pub fn name_prefix(&self) -> &'static str {
        match self {
            Severity::Warn => "w_",
            Severity::Error => "e_",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warn => write!(f, "warn"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Standards body a lint is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LintSource {
    /// RFC 5280 (Internet X.509 PKI Certificate and CRL Profile)
    #[serde(rename = "rfc5280")]
    Rfc5280,
    /// CA/Browser Forum Baseline Requirements
    #[serde(rename = "cabf_br")]
    CabfBaselineRequirements,
}

impl LintSource {
    pub const ALL: [LintSource; 2] = [LintSource::Rfc5280, LintSource::CabfBaselineRequirements];

    pub fn as_str(&self) -> &'static str {
        match self {
            LintSource::Rfc5280 => "rfc5280",
            LintSource::CabfBaselineRequirements => "cabf_br",
        }
    }
}

impl fmt::Display for LintSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintSource::Rfc5280 => write!(f, "RFC 5280"),
            LintSource::CabfBaselineRequirements => write!(f, "CA/B Forum Baseline Requirements"),
        }
    }
}

impl FromStr for LintSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "rfc5280" => Ok(LintSource::Rfc5280),
            "cabf_br" | "cabf" | "br" => Ok(LintSource::CabfBaselineRequirements),
            _ => Err(format!(
                "Unknown lint source: '{}'. Valid sources: rfc5280, cabf_br",
                s
            )),
        }
    }
}

/// Error types for certlint operations.
#[derive(Debug, thiserror::Error)]
pub enum CertlintError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ParseError,
    },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
