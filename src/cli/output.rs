//! Output formatting for certlint.
//!
//! Provides terminal and JSON output formatters.
//!
//! # Graceful Degradation
//!
//! - Color: disabled via NO_COLOR or --no-color
//! - Empty input: Produces valid output with zero certificates
//! - Partial reports: Flagged in the output rather than treated as failures
//!
//! All formatters produce valid output for any set of reports.
//! No function in this module will panic.

use crate::cli::args::OutputFormat;
use crate::commands::lint::{exit_code, FileReport};
use crate::engine::result::ResultSummary;
use crate::LintStatus;
use serde::Serialize;

const RULE: &str =
    "--------------------------------------------------------------------------------";

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format the reports of one invocation into a string
    fn format(&self, reports: &[FileReport]) -> String;
}

/// Terminal (human-readable) formatter
pub struct TerminalFormatter {
    color: bool,
    verbose: bool,
    quiet: bool,
}

impl TerminalFormatter {
    pub fn new(color: bool, verbose: bool, quiet: bool) -> Self {
        TerminalFormatter {
            color,
            verbose,
            quiet,
        }
    }

    fn colorize(&self, text: &str, color_code: &str) -> String {
        if self.color {
            format!("\x1b[{}m{}\x1b[0m", color_code, text)
        } else {
            text.to_string()
        }
    }

    fn status_label(&self, status: LintStatus) -> String {
        let label = format!("{:<8}", format!("[{}]", status));
        match status {
            LintStatus::Pass => self.colorize(&label, "32"),
            LintStatus::Warn => self.colorize(&label, "33"),
            LintStatus::Error => self.colorize(&label, "31"),
            LintStatus::Fatal => self.colorize(&label, "35"),
            LintStatus::NotApplicable => self.colorize(&label, "90"),
        }
    }

    fn shows(&self, status: LintStatus) -> bool {
        match status {
            LintStatus::Pass => !self.quiet,
            LintStatus::NotApplicable => self.verbose,
            LintStatus::Warn | LintStatus::Error | LintStatus::Fatal => true,
        }
    }
}

impl OutputFormatter for TerminalFormatter {
    fn format(&self, reports: &[FileReport]) -> String {
        let mut output = String::new();
        let mut total = ResultSummary::default();

        for file in reports {
            output.push_str(RULE);
            output.push('\n');
            output.push_str(&format!("{} [certificate #{}]\n", file.path, file.index));
            output.push_str(&format!("Subject: {}\n", file.subject));
            if self.verbose {
                output.push_str(&format!("Serial: {}\n", file.serial));
            }
            output.push_str(RULE);
            output.push('\n');

            for (name, result) in file.report.iter() {
                if !self.shows(result.status) {
                    continue;
                }
                output.push_str(&format!("  {} {}", self.status_label(result.status), name));
                match &result.details {
                    Some(details) if result.status != LintStatus::Pass || self.verbose => {
                        output.push_str(&format!(": {}\n", details));
                    }
                    _ => output.push('\n'),
                }
            }

            let summary = file.report.summary();
            output.push_str(&format!(
                "  {} passed, {} warnings, {} errors, {} fatal, {} not applicable",
                summary.passed, summary.warnings, summary.errors, summary.fatal, summary.not_applicable
            ));
            if self.verbose {
                output.push_str(&format!(" ({}ms)", file.report.duration_ms));
            }
            output.push('\n');
            if file.report.partial {
                output.push_str(&format!(
                    "  {}\n",
                    self.colorize("Run stopped early; some lints did not execute", "33")
                ));
            }
            output.push('\n');

            add_summary(&mut total, &summary);
        }

        output.push_str(RULE);
        output.push('\n');
        output.push_str(&format!(
            "SUMMARY: {} certificates, {} passed, {} warnings, {} errors, {} fatal\n",
            reports.len(),
            total.passed,
            total.warnings,
            total.errors,
            total.fatal
        ));

        let code = exit_code(reports);
        let exit_desc = match code {
            0 => "no findings",
            2 => "warnings detected",
            _ => "errors detected",
        };
        output.push_str(&format!("Exit code: {} ({})\n", code, exit_desc));
        output.push_str(RULE);

        output
    }
}

fn add_summary(total: &mut ResultSummary, summary: &ResultSummary) {
    total.passed += summary.passed;
    total.warnings += summary.warnings;
    total.errors += summary.errors;
    total.not_applicable += summary.not_applicable;
    total.fatal += summary.fatal;
    total.total += summary.total;
}

/// JSON formatter
pub struct JsonFormatter {
    pretty: bool,
}

#[derive(Serialize)]
struct JsonCertificate<'a> {
    #[serde(flatten)]
    file: &'a FileReport,
    summary: ResultSummary,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    certificates: Vec<JsonCertificate<'a>>,
    summary: ResultSummary,
    exit_code: u8,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        JsonFormatter { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, reports: &[FileReport]) -> String {
        let mut total = ResultSummary::default();
        let certificates = reports
            .iter()
            .map(|file| {
                let summary = file.report.summary();
                add_summary(&mut total, &summary);
                JsonCertificate { file, summary }
            })
            .collect();

        let doc = JsonOutput {
            certificates,
            summary: total,
            exit_code: exit_code(reports),
        };

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&doc)
        } else {
            serde_json::to_string(&doc)
        };

        rendered.unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string())
    }
}

/// Get a formatter based on the output format
pub fn get_formatter(
    format: &OutputFormat,
    no_color: bool,
    verbose: bool,
    quiet: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TerminalFormatter::new(!no_color, verbose, quiet)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
    }
}
