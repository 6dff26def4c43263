//! certlint CLI entry point
//!
//! Lints X.509 certificates against RFC 5280 and the CA/B Forum Baseline
//! Requirements.

use anyhow::Context;
use certlint::cli::args::{Cli, Command};
use certlint::commands::{lint, list};
use certlint::version::get_build_info;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Usage errors share the runtime-error exit code; 2 means "warnings"
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(lint::EXIT_RUNTIME_ERROR)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    certlint::cli::install_panic_hook();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(lint::EXIT_RUNTIME_ERROR)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    match cli.command {
        Command::Version => {
            println!("{}", get_build_info());
            Ok(lint::EXIT_CLEAN)
        }
        Command::List(args) => {
            let output = list::run(&args).context("failed to build the lint registry")?;
            print!("{}", output);
            Ok(lint::EXIT_CLEAN)
        }
        Command::Lint(args) => {
            let outcome = lint::run(&args).context("lint run failed")?;
            println!("{}", outcome.output);
            Ok(outcome.exit_code)
        }
    }
}
