//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive
pub const ENV_LOG: &str = "QUICKREPLY_LOG";

/// Install the global subscriber, writing to stderr
///
/// `default_directive` applies when `QUICKREPLY_LOG` is unset or invalid.
/// Calling this twice is harmless; the first subscriber stays.
pub fn init_logging(default_directive: &str) {
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
