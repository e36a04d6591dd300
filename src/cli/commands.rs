//! CLI command implementations

use std::path::Path;

use crate::http_server::{HttpServer, ServerConfig};
use crate::observability::init_logging;
use crate::store::load_dataset;

use super::args::{Command, ServeArgs};
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve(args) => serve(args),
        Command::Check { data } => check(&data),
    }
}

/// Load the dataset and serve it until the process is stopped
pub fn serve(args: ServeArgs) -> CliResult<()> {
    init_logging();
    let config: ServerConfig = args.resolve()?;

    let dataset = load_dataset(&config.data_path).map_err(|e| {
        CliError::data_error(format!("{}: {}", config.data_path.display(), e))
    })?;
    tracing::info!(
        records = dataset.len(),
        path = %config.data_path.display(),
        "dataset loaded"
    );

    let server = HttpServer::new(config, dataset);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::io_error(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::io_error(format!("HTTP server failed: {}", e)))
    })
}

/// Validate a dataset file and print a summary
pub fn check(data_path: &Path) -> CliResult<()> {
    let dataset = load_dataset(data_path)?;
    println!(
        "{}: {} records, {} distinct types",
        data_path.display(),
        dataset.len(),
        dataset.distinct_types().len()
    );
    Ok(())
}
