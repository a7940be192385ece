//! Command dispatch for the muzima CLI.
//!
//! Responsibilities:
//! - Open the form service described by the configuration.
//! - Route each parsed command to its handler.
//!
//! Does NOT handle:
//! - Argument parsing (see `args`).
//! - Exit code mapping (see `error`).

use anyhow::Result;
use muzima_api::FormService;
use muzima_config::Config;

use crate::args::{Cli, Commands};
use crate::commands;

pub async fn run_command(cli: Cli, config: Config) -> Result<()> {
    let service = FormService::from_config(&config)?;
    tracing::debug!(
        server_url = %config.connection.server_url,
        data_dir = %config.storage.data_dir.display(),
        "Form service ready"
    );

    match cli.command {
        Commands::Forms { command } => {
            commands::forms::run(&service, command, &cli.output, cli.output_file).await?;
        }
        Commands::Templates { command } => {
            commands::templates::run(&service, command, &cli.output, cli.output_file).await?;
        }
        Commands::Data { command } => {
            commands::data::run(&service, command, &cli.output, cli.output_file)?;
        }
        Commands::Index { command } => {
            commands::index::run(&service, command, &cli.output, cli.output_file)?;
        }
    }

    Ok(())
}
