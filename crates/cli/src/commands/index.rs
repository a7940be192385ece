//! Index command implementation.
//!
//! Responsibilities:
//! - Run a raw query against one entity kind of the local index.

use anyhow::Result;
use clap::Subcommand;
use muzima_api::FormService;
use std::path::PathBuf;

use crate::formatters::{OutputFormat, get_formatter, output_result};

#[derive(Subcommand)]
pub enum IndexCommand {
    /// Search local documents of one kind
    Search {
        /// Entity kind
        #[arg(value_parser = ["form", "form_template", "form_data"])]
        kind: String,

        /// Query, e.g. 'status:complete AND patientUuid:"p-1"' (empty matches everything)
        #[arg(default_value = "")]
        query: String,
    },
}

pub fn run(
    service: &FormService,
    command: IndexCommand,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<()> {
    let format = OutputFormat::from_str(output_format)?;
    let formatter = get_formatter(format);

    match command {
        IndexCommand::Search { kind, query } => {
            let results = service.search(&kind, &query)?;
            let output = formatter.format_search_results(&results)?;
            output_result(&output, format, output_file.as_ref())
        }
    }
}
