//! Structured logging setup
//!
//! Logs go through `tracing`. The filter defaults to `info` for dependencies
//! and `debug` for this crate, and `RUST_LOG` overrides it.

use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info,pokedex=debug,tower_http=debug";

/// Build the log filter from the environment or the default
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// Returns `false` when a subscriber was already installed.
pub fn init_logging() -> bool {
    fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .try_init()
        .is_ok()
}
