//! CLI argument definitions using clap
//!
//! Commands:
//! - pokedex serve [--config <path>] [--host <host>] [--port <port>] [--data <path>] [--client-dir <dir>]
//! - pokedex check [--data <path>]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::http_server::ServerConfig;

use super::errors::{CliError, CliResult};

/// Pokedex - an in-memory Pokémon catalog over HTTP
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the dataset and start the HTTP server
    Serve(ServeArgs),

    /// Validate a dataset file and exit
    Check {
        /// Path to the dataset file
        #[arg(long, default_value = "data/pokedex.json")]
        data: PathBuf,
    },
}

/// Options for `serve`; each one overrides the config file
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Path to the dataset file
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Directory holding client.html and style.css
    #[arg(long)]
    pub client_dir: Option<PathBuf>,
}

impl ServeArgs {
    /// Layer the flags over the config file (or the defaults)
    pub fn resolve(self) -> CliResult<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path).map_err(|e| {
                CliError::config_error(format!("{}: {}", path.display(), e))
            })?,
            None => ServerConfig::default(),
        };

        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(data) = self.data {
            config.data_path = data;
        }
        if let Some(client_dir) = self.client_dir {
            config.client_dir = client_dir;
        }

        Ok(config)
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "pokedex",
            "serve",
            "--port",
            "8081",
            "--data",
            "fixtures/pokedex.json",
        ])
        .unwrap();

        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.port, 8081);
        assert_eq!(config.data_path, PathBuf::from("fixtures/pokedex.json"));
        assert_eq!(config.client_dir, PathBuf::from("client"));
    }

    #[test]
    fn test_missing_config_file_is_config_error() {
        let args = ServeArgs {
            config: Some(PathBuf::from("/no/such/config.json")),
            ..Default::default()
        };
        let err = args.resolve().unwrap_err();
        assert_eq!(err.code_str(), "POKEDEX_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_check_default_path() {
        let cli = Cli::try_parse_from(["pokedex", "check"]).unwrap();
        assert!(matches!(cli.command, Command::Check { data } if data == PathBuf::from("data/pokedex.json")));
    }
}
