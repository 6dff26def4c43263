//! Configuration loading tests.

use certlint::cli::args::{Cli, Command, LintArgs, OutputFormat};
use certlint::config::{ConfigError, LintConfig};
use certlint::engine::LintSelection;
use certlint::LintSource;
use clap::Parser;
use std::io::Write;

fn lint_args(extra: &[&str]) -> LintArgs {
    let argv = ["certlint", "lint", "leaf.pem"].into_iter().chain(extra.iter().copied());
    match Cli::try_parse_from(argv).unwrap().command {
        Command::Lint(args) => args,
        other => panic!("expected lint command, got {:?}", other),
    }
}

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_file() {
    let file = config_file(
        r#"
        skip = ["w_ext_key_usage_not_critical"]
        parallel = true
        max_parallel = 2
        timeout_ms = 1500
        "#,
    );

    let config = LintConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.skip, vec!["w_ext_key_usage_not_critical".to_string()]);
    assert!(config.parallel);
    assert_eq!(config.max_parallel, 2);
    assert_eq!(config.timeout_ms, 1500);
    assert_eq!(config.format, OutputFormat::Text);
}

#[test]
fn test_missing_file() {
    let err = LintConfig::load_from_file("/nonexistent/certlint.toml").unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn test_malformed_file() {
    let file = config_file("parallel = \"sometimes\"");
    let err = LintConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_invalid_worker_count() {
    let file = config_file("max_parallel = 0");
    let err = LintConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn test_flags_override_file() {
    let file = config_file(
        r#"
        sources = ["rfc5280"]
        timeout_ms = 1500
        format = "json"
        "#,
    );
    let path = file.path().display().to_string();
    let args = lint_args(&[
        "--config",
        &path,
        "--source",
        "cabf_br",
        "--timeout-ms",
        "0",
        "--format",
        "text",
    ]);

    let config = LintConfig::from_args(&args).unwrap();
    assert_eq!(config.sources, vec![LintSource::CabfBaselineRequirements]);
    assert_eq!(config.timeout_ms, 0);
    assert_eq!(config.format, OutputFormat::Text);
}

#[test]
fn test_file_values_survive_absent_flags() {
    let file = config_file("only = [\"e_dnsname_underscore_in_sld\"]\nparallel = true");
    let path = file.path().display().to_string();
    let args = lint_args(&["--config", &path]);

    let config = LintConfig::from_args(&args).unwrap();
    assert!(config.parallel);
    assert_eq!(
        config.selection(),
        LintSelection::Named(vec!["e_dnsname_underscore_in_sld".to_string()])
    );
    assert!(config.orchestrator_config().parallel);
}
