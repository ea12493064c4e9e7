//! Logging setup
//!
//! Libraries in this workspace only emit `tracing` events. Binaries and
//! tests that want to see them call [`init_logging`] once.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `primecount=debug`)
pub const LOG_ENV_VAR: &str = "PRIMECOUNT_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Build the filter from `PRIMECOUNT_LOG`, then `RUST_LOG`, then `warn`
pub fn env_filter() -> EnvFilter {
    match std::env::var(LOG_ENV_VAR) {
        Ok(directives) => EnvFilter::try_new(&directives)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        Err(_) => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    }
}

/// Install a global fmt subscriber writing to stderr.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_logging() -> bool {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_thread_names(true)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("Logging initialized (primecount {})", crate::VERSION);
    }
    installed
}
