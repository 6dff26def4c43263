//! Version and build information.
//!
//! Provides version, git commit, and build metadata.

use std::fmt;

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: Option<&'static str>,
    pub build_date: Option<&'static str>,
    pub target: &'static str,
    pub rustc_version: Option<&'static str>,
    /// Number of lints compiled into this binary
    pub lint_count: usize,
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "certlint {}", self.version)?;

        if let Some(commit) = self.commit {
            writeln!(f, "Commit: {}", commit)?;
        }

        if let Some(date) = self.build_date {
            writeln!(f, "Built: {}", date)?;
        }

        writeln!(f, "Target: {}", self.target)?;
        writeln!(f, "Lints: {}", self.lint_count)?;

        if let Some(rustc) = self.rustc_version {
            write!(f, "Rustc: {}", rustc)?;
        }

        Ok(())
    }
}

/// Get build information
pub fn get_build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        commit: option_env!("CERTLINT_GIT_HASH"),
        build_date: option_env!("CERTLINT_BUILD_DATE"),
        target: option_env!("CERTLINT_TARGET").unwrap_or(std::env::consts::ARCH),
        rustc_version: option_env!("CERTLINT_RUSTC_VERSION"),
        lint_count: crate::lints::default_registry()
            .map(|r| r.len())
            .unwrap_or(0),
    }
}
