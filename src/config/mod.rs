//! Run configuration.
//!
//! Settings load from an optional TOML file; command-line flags then
//! override whatever the file set.
//!
//! ```toml
//! skip = ["w_ext_key_usage_not_critical"]
//! sources = ["cabf_br"]
//! parallel = true
//! timeout_ms = 5000
//! format = "json"
//! ```

use crate::cli::args::{LintArgs, OutputFormat};
use crate::engine::orchestrator::{LintSelection, OrchestratorConfig};
use crate::LintSource;
use serde::Deserialize;
use std::path::Path;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("could not read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Lint run settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    /// Run exactly these lints
    pub only: Vec<String>,
    /// Run everything except these lints
    pub skip: Vec<String>,
    /// Restrict the run to these standards
    pub sources: Vec<LintSource>,
    pub parallel: bool,
    /// Bound on a single certificate's run (0 = unbounded)
    pub timeout_ms: u64,
    pub max_parallel: usize,
    pub format: OutputFormat,
}

impl Default for LintConfig {
    fn default() -> Self {
        let orchestrator = OrchestratorConfig::default();
        LintConfig {
            only: Vec::new(),
            skip: Vec::new(),
            sources: Vec::new(),
            parallel: orchestrator.parallel,
            timeout_ms: orchestrator.timeout_ms,
            max_parallel: orchestrator.max_parallel,
            format: OutputFormat::default(),
        }
    }
}

impl LintConfig {
    /// Load settings from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: display.clone(),
            },
            _ => ConfigError::Io {
                path: display.clone(),
                source: e,
            },
        })?;

        let config: LintConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: display.clone(),
            message: e.to_string(),
        })?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Settings for a `lint` invocation: the file named by `--config` (if
    /// any) with the remaining flags applied on top.
    pub fn from_args(args: &LintArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => LintConfig::load_from_file(path)?,
            None => LintConfig::default(),
        };
        config.merge_args(args);
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides. Flags that were not given leave the
    /// file's value alone.
    pub fn merge_args(&mut self, args: &LintArgs) {
        if !args.only.is_empty() {
            self.only = args.only.clone();
        }
        if !args.skip.is_empty() {
            self.skip = args.skip.clone();
        }
        if !args.sources.is_empty() {
            self.sources = args.sources.clone();
        }
        if args.parallel {
            self.parallel = true;
        }
        if let Some(timeout_ms) = args.timeout_ms {
            self.timeout_ms = timeout_ms;
        }
        if let Some(format) = args.format {
            self.format = format;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_parallel == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_parallel".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if !self.only.is_empty() && !self.skip.is_empty() {
            tracing::warn!("both 'only' and 'skip' are set; 'skip' is ignored");
        }
        Ok(())
    }

    /// Lints to run. `only` wins over `skip`, which wins over `sources`.
    pub fn selection(&self) -> LintSelection {
        if !self.only.is_empty() {
            LintSelection::Named(self.only.clone())
        } else if !self.skip.is_empty() {
            LintSelection::Excluding(self.skip.clone())
        } else if !self.sources.is_empty() {
            LintSelection::Sources(self.sources.clone())
        } else {
            LintSelection::All
        }
    }

    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            parallel: self.parallel,
            timeout_ms: self.timeout_ms,
            max_parallel: self.max_parallel,
        }
    }
}
