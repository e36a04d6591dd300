//! CLI module for the Pokedex server
//!
//! Provides command-line interface for:
//! - serve: load the dataset and start the HTTP server
//! - check: validate a dataset file

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, ServeArgs};
pub use commands::{check, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
