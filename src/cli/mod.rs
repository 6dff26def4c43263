//! CLI module for argument parsing and output formatting.

pub mod args;
pub mod output;

/// Replace the default panic hook with one that logs through `tracing`.
///
/// Lint panics are already reported as `Fatal` results, so the default
/// hook's stderr message (and backtrace under `RUST_BACKTRACE`) only adds
/// noise to the CLI output. The message is kept at debug level.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        tracing::debug!("panic: {}", info);
    }));
}
