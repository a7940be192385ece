//! Forms command implementation.
//!
//! Responsibilities:
//! - Download forms by uuid or name into the local index.
//! - List, show and delete local forms.
//!
//! Does NOT handle:
//! - Form templates (see `templates`).

use anyhow::Result;
use clap::Subcommand;
use muzima_api::FormService;
use muzima_client::Form;
use std::path::PathBuf;
use tracing::info;

use crate::error::CommandError;
use crate::formatters::{OutputFormat, get_formatter, output_result};

#[derive(Subcommand)]
pub enum FormsCommand {
    /// Download forms from the server into the local index
    Download {
        /// Download the single form with this uuid
        #[arg(long, conflicts_with = "name")]
        uuid: Option<String>,

        /// Download forms whose name contains this text (all forms when omitted)
        #[arg(long)]
        name: Option<String>,
    },

    /// List local forms
    List {
        /// Only forms whose name contains this text
        #[arg(long)]
        name: Option<String>,
    },

    /// Show one local form
    Show {
        /// Form uuid
        uuid: String,
    },

    /// Delete a form from the local index
    Delete {
        /// Form uuid
        uuid: String,
    },
}

pub async fn run(
    service: &FormService,
    command: FormsCommand,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<()> {
    let format = OutputFormat::from_str(output_format)?;
    let formatter = get_formatter(format);

    let forms = match command {
        FormsCommand::Download {
            uuid: Some(uuid), ..
        } => {
            info!(uuid = %uuid, "Downloading form");
            let form = service
                .download_form_by_uuid(&uuid)
                .await?
                .ok_or_else(|| not_found(&uuid))?;
            vec![form]
        }
        FormsCommand::Download { uuid: None, name } => {
            let name = name.unwrap_or_default();
            info!(name = %name, "Downloading forms");
            service.download_forms_by_name(&name).await?
        }
        FormsCommand::List { name } => service.get_form_by_name(name.as_deref().unwrap_or(""))?,
        FormsCommand::Show { uuid } => {
            vec![service.get_form_by_uuid(&uuid)?.ok_or_else(|| not_found(&uuid))?]
        }
        FormsCommand::Delete { uuid } => {
            let form = service
                .get_form_by_uuid(&uuid)?
                .unwrap_or_else(|| Form::new(uuid.as_str(), ""));
            service.delete_form(&form)?;
            eprintln!("Form '{}' deleted.", uuid);
            return Ok(());
        }
    };

    let output = formatter.format_forms(&forms)?;
    output_result(&output, format, output_file.as_ref())
}

fn not_found(uuid: &str) -> CommandError {
    CommandError::NotFound {
        kind: "Form",
        uuid: uuid.to_string(),
    }
}
