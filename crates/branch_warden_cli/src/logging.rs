//! Process-wide `tracing` subscriber setup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;

/// Environment variable holding an explicit log filter.
pub const LOG_ENV_VAR: &str = "BRANCH_WARDEN_LOG";

/// Returns the filter used when [`LOG_ENV_VAR`] is not set.
///
/// Verbose mode enables per-repository detail from this workspace's crates only.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "info,branch_warden_cli=debug,branch_warden_core=debug,github_client=debug"
    } else {
        "info"
    }
}

/// Builds the log filter from [`LOG_ENV_VAR`], falling back to [`default_filter`].
pub fn build_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)))
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer())
        .with(build_filter(verbose))
        .try_init();
}
