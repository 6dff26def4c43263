//! Output formatter integration tests.

use crate::mocks::certificates::{recent, subscriber_cert};
use certlint::cli::args::OutputFormat;
use certlint::cli::output::{get_formatter, JsonFormatter, OutputFormatter, TerminalFormatter};
use certlint::commands::lint::FileReport;
use certlint::engine::{LintOrchestrator, OrchestratorConfig};
use certlint::lints;
use std::sync::Arc;

fn reports_for(dns_names: &[&str]) -> Vec<FileReport> {
    let cert = subscriber_cert(dns_names, recent());
    let orch = LintOrchestrator::new(
        Arc::new(lints::default_registry().unwrap()),
        OrchestratorConfig::default(),
    );
    vec![FileReport {
        path: "leaf.pem".to_string(),
        index: 0,
        subject: cert.subject.clone(),
        serial: cert.serial.clone(),
        report: orch.run_all(&cert),
    }]
}

#[test]
fn test_terminal_lists_findings_in_name_order() {
    let output = TerminalFormatter::new(false, false, false).format(&reports_for(&["www.ex_ample.com"]));

    let pos_sld = output.find("e_dnsname_underscore_in_sld").unwrap();
    let pos_unique = output.find("e_cert_contains_unique_identifier").unwrap();
    assert!(pos_unique < pos_sld);
    assert!(output.contains("[ERROR]"));
    assert!(output.contains("leaf.pem [certificate #0]"));
    assert!(output.contains("Exit code: 1 (errors detected)"));
}

#[test]
fn test_terminal_clean_run() {
    let output = TerminalFormatter::new(false, false, true).format(&reports_for(&["www.example.com"]));
    assert!(!output.contains("[PASS]"));
    assert!(output.contains("Exit code: 0 (no findings)"));
}

#[test]
fn test_verbose_shows_not_applicable() {
    let output = TerminalFormatter::new(false, true, false).format(&reports_for(&["www.example.com"]));
    assert!(output.contains("[N/A]"));
    assert!(output.contains("e_basic_constraints_not_critical"));
    assert!(output.contains("Serial: 01:23:45"));
}

#[test]
fn test_color_codes_only_when_enabled() {
    let reports = reports_for(&["www.ex_ample.com"]);
    assert!(TerminalFormatter::new(true, false, false)
        .format(&reports)
        .contains("\x1b[31m"));
    assert!(!TerminalFormatter::new(false, false, false)
        .format(&reports)
        .contains("\x1b["));
}

#[test]
fn test_json_structure() {
    let output = JsonFormatter::new(true).format(&reports_for(&["www.ex_ample.com"]));
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    let cert = &value["certificates"][0];
    assert_eq!(cert["path"], "leaf.pem");
    assert_eq!(cert["index"], 0);
    assert_eq!(cert["report"]["partial"], false);
    assert_eq!(
        cert["report"]["results"]["e_dnsname_underscore_in_sld"]["status"],
        "error"
    );
    assert_eq!(
        cert["report"]["results"]["e_cert_unique_identifier_version_not_2_or_3"]["status"],
        "na"
    );
    assert_eq!(cert["summary"]["total"], 12);
    assert_eq!(value["exit_code"], 1);
}

#[test]
fn test_empty_input_is_valid_json() {
    let output = JsonFormatter::new(false).format(&[]);
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["certificates"].as_array().unwrap().len(), 0);
    assert_eq!(value["exit_code"], 0);
}

#[test]
fn test_get_formatter_selects_json() {
    let output = get_formatter(&OutputFormat::Json, true, false, false).format(&reports_for(&[]));
    assert!(serde_json::from_str::<serde_json::Value>(&output).is_ok());
}
