//! Lint engine.
//!
//! Provides the lint contract, the registry, effective-date scoping,
//! execution orchestration and result aggregation.

pub mod effective;
pub mod lint;
pub mod orchestrator;
pub mod registry;
pub mod result;

pub use effective::{is_in_scope, EffectiveWindow};
pub use lint::{ConfigurationError, Lint, LintDescriptor, RegisteredLint};
pub use orchestrator::{LintOrchestrator, LintSelection, OrchestratorConfig};
pub use registry::{LintRegistry, RegistryError};
pub use result::{LintReport, ResultAggregator, ResultSummary};
