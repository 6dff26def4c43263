//! Command line arguments for certlint.

use crate::LintSource;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "certlint")]
#[command(version)]
#[command(about = "Lint X.509 certificates against RFC 5280 and the CA/B Forum Baseline Requirements")]
#[command(propagate_version = true)]
#[command(after_help = "EXIT CODES:\n    0   No findings\n    1   One or more errors\n    2   Warnings only\n    3   Runtime error")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lint one or more certificate files (PEM or DER)
    Lint(LintArgs),

    /// List registered lints
    List(ListArgs),

    /// Print version and build information
    Version,
}

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable terminal output
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct LintArgs {
    /// Certificate files; PEM files may hold several certificates
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Run only this lint (repeatable)
    #[arg(long, value_name = "NAME")]
    pub only: Vec<String>,

    /// Skip this lint (repeatable)
    #[arg(long, value_name = "NAME")]
    pub skip: Vec<String>,

    /// Run only lints from this standard: rfc5280, cabf_br (repeatable)
    #[arg(long = "source", value_name = "SRC")]
    pub sources: Vec<LintSource>,

    /// Output format
    #[arg(long, value_enum, env = "CERTLINT_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Only show errors and warnings
    #[arg(short, long)]
    pub quiet: bool,

    /// Include not-applicable lints and details
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Disable colored output (also honors NO_COLOR)
    #[arg(long)]
    pub no_color: bool,

    /// Run lints on a worker pool
    #[arg(long)]
    pub parallel: bool,

    /// Per-certificate time budget in milliseconds (0 = unbounded)
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Load settings from a TOML file
    #[arg(long, value_name = "FILE", env = "CERTLINT_CONFIG")]
    pub config: Option<PathBuf>,
}

impl LintArgs {
    /// Color is off with `--no-color` or when `NO_COLOR` is set to anything
    /// non-empty.
    pub fn color_disabled(&self) -> bool {
        self.no_color || std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Only list lints from this standard (repeatable)
    #[arg(long = "source", value_name = "SRC")]
    pub sources: Vec<LintSource>,
}
