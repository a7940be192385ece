//! Form templates command implementation.
//!
//! Responsibilities:
//! - Download templates by uuid and import them from JSON files.
//! - List, show and delete local templates.

use anyhow::Result;
use clap::Subcommand;
use muzima_api::FormService;
use muzima_client::FormTemplate;
use std::path::PathBuf;

use crate::commands::read_entities;
use crate::error::CommandError;
use crate::formatters::{OutputFormat, get_formatter, output_result};

#[derive(Subcommand)]
pub enum TemplatesCommand {
    /// Download the template of a form from the server
    Download {
        /// Form uuid
        uuid: String,
    },

    /// List local templates
    List,

    /// Show one local template with its model and HTML
    Show {
        /// Template uuid
        uuid: String,
    },

    /// Import templates from a JSON file (one object or an array)
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },

    /// Delete an imported template
    Delete {
        /// Template uuid
        uuid: String,
    },
}

pub async fn run(
    service: &FormService,
    command: TemplatesCommand,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<()> {
    let format = OutputFormat::from_str(output_format)?;
    let formatter = get_formatter(format);

    let output = match command {
        TemplatesCommand::Download { uuid } => {
            let template = service
                .download_form_template_by_uuid(&uuid)
                .await?
                .ok_or_else(|| not_found(&uuid))?;
            formatter.format_form_template(&template)?
        }
        TemplatesCommand::List => {
            formatter.format_form_templates(&service.get_all_form_templates()?)?
        }
        TemplatesCommand::Show { uuid } => {
            let template = service
                .get_form_template_by_uuid(&uuid)?
                .ok_or_else(|| not_found(&uuid))?;
            formatter.format_form_template(&template)?
        }
        TemplatesCommand::Import { file } => {
            let templates: Vec<FormTemplate> = read_entities(&file)?;
            let count = service.save_form_templates(&templates)?;
            eprintln!("Imported {count} form template(s).");
            formatter.format_form_templates(&templates)?
        }
        TemplatesCommand::Delete { uuid } => {
            service.delete_form_template(&FormTemplate::new(uuid.as_str()))?;
            eprintln!("Form template '{}' deleted.", uuid);
            return Ok(());
        }
    };

    output_result(&output, format, output_file.as_ref())
}

fn not_found(uuid: &str) -> CommandError {
    CommandError::NotFound {
        kind: "Form template",
        uuid: uuid.to_string(),
    }
}
