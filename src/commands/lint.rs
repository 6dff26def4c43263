//! Lint command
//!
//! Loads certificates from files, runs the selected lints over each one and
//! renders the reports.

use crate::certificate::{parse_der, parse_pem_bundle, Certificate};
use crate::cli::args::LintArgs;
use crate::cli::output::get_formatter;
use crate::config::LintConfig;
use crate::engine::orchestrator::{LintOrchestrator, LintSelection};
use crate::engine::result::LintReport;
use crate::lints;
use crate::{CertlintError, LintStatus};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Exit code when no lint reported a problem
pub const EXIT_CLEAN: u8 = 0;
/// Exit code when any lint returned Error or Fatal
pub const EXIT_ERRORS: u8 = 1;
/// Exit code when the worst finding is a warning
pub const EXIT_WARNINGS: u8 = 2;
/// Exit code for runtime failures (unreadable input, bad configuration)
pub const EXIT_RUNTIME_ERROR: u8 = 3;

/// Report for one certificate within an input file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    /// Position of the certificate within its file, starting at 0
    pub index: usize,
    pub subject: String,
    pub serial: String,
    pub report: LintReport,
}

/// Rendered output and the process exit code it implies.
#[derive(Debug)]
pub struct LintOutcome {
    pub output: String,
    pub exit_code: u8,
}

pub fn run(args: &LintArgs) -> Result<LintOutcome, CertlintError> {
    let config = LintConfig::from_args(args)?;
    let registry = lints::default_registry()?;
    let orchestrator = LintOrchestrator::new(Arc::new(registry), config.orchestrator_config());

    let reports = lint_files(&orchestrator, &args.files, &config.selection())?;

    let formatter = get_formatter(&config.format, args.color_disabled(), args.verbose, args.quiet);
    Ok(LintOutcome {
        output: formatter.format(&reports),
        exit_code: exit_code(&reports),
    })
}

/// Lint every certificate in every file, in input order.
///
/// The selection is resolved before the first certificate is linted, so a
/// misspelled lint name fails the whole run without partial output.
pub fn lint_files(
    orchestrator: &LintOrchestrator,
    files: &[PathBuf],
    selection: &LintSelection,
) -> Result<Vec<FileReport>, CertlintError> {
    orchestrator.resolve(selection)?;

    let mut reports = Vec::new();
    for path in files {
        let certs = load_certificates(path)?;
        tracing::debug!(path = %path.display(), count = certs.len(), "loaded certificates");

        for (index, cert) in certs.iter().enumerate() {
            let report = orchestrator.run(cert, selection)?;
            reports.push(FileReport {
                path: path.display().to_string(),
                index,
                subject: cert.subject.clone(),
                serial: cert.serial.clone(),
                report,
            });
        }
    }
    Ok(reports)
}

/// Read a PEM bundle or a single DER certificate from `path`.
pub fn load_certificates(path: &Path) -> Result<Vec<Certificate>, CertlintError> {
    let data = std::fs::read(path).map_err(|e| CertlintError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let parsed = if looks_like_pem(&data) {
        parse_pem_bundle(&data)
    } else {
        parse_der(&data).map(|cert| vec![cert])
    };

    parsed.map_err(|e| CertlintError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

fn looks_like_pem(data: &[u8]) -> bool {
    data.windows(b"-----BEGIN".len()).any(|w| w == b"-----BEGIN")
}

/// Exit code for a set of reports: errors beat warnings beat clean.
pub fn exit_code(reports: &[FileReport]) -> u8 {
    if reports.iter().any(|r| r.report.has_failures()) {
        EXIT_ERRORS
    } else if reports
        .iter()
        .any(|r| !r.report.with_status(LintStatus::Warn).is_empty())
    {
        EXIT_WARNINGS
    } else {
        EXIT_CLEAN
    }
}
