//! Tracing subscriber for the `brandi` binary.
//!
//! The filter comes from `BRANDI_LOG`, then `RUST_LOG`, and defaults to `warn`.
//! Output goes to stderr so stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "BRANDI_LOG";
const DEFAULT_FILTER: &str = "warn";

pub fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber; a second call is a no-op.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
