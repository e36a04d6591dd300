//! Observability
//!
//! Logging setup for the server and CLI.

mod logger;

pub use logger::{env_filter, init_logging, DEFAULT_FILTER};
