//! Form data command implementation.
//!
//! Responsibilities:
//! - Import captured form data from JSON files.
//! - List local form data filtered by status, patient or user.
//! - Show and delete single entries.

use anyhow::Result;
use clap::Subcommand;
use muzima_api::FormService;
use muzima_client::FormData;
use std::path::PathBuf;

use crate::commands::read_entities;
use crate::error::CommandError;
use crate::formatters::{OutputFormat, get_formatter, output_result};

#[derive(Subcommand)]
pub enum DataCommand {
    /// List local form data
    List {
        /// Only entries with this status (e.g. complete, incomplete)
        #[arg(long, default_value = "")]
        status: String,

        /// Only entries for this patient uuid
        #[arg(long, conflicts_with = "user")]
        patient: Option<String>,

        /// Only entries captured by this user uuid
        #[arg(long)]
        user: Option<String>,
    },

    /// Show one form data entry
    Show {
        /// Form data uuid
        uuid: String,
    },

    /// Import form data from a JSON file (one object or an array)
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },

    /// Delete a form data entry
    Delete {
        /// Form data uuid
        uuid: String,
    },
}

pub fn run(
    service: &FormService,
    command: DataCommand,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<()> {
    let format = OutputFormat::from_str(output_format)?;
    let formatter = get_formatter(format);

    let data = match command {
        DataCommand::List {
            status,
            patient,
            user,
        } => match (patient, user) {
            (Some(patient), _) => service.get_form_data_by_patient(&patient, &status)?,
            (None, Some(user)) => service.get_form_data_by_user(&user, &status)?,
            (None, None) => service.get_all_form_data(&status)?,
        },
        DataCommand::Show { uuid } => {
            let entry = service
                .get_form_data_by_uuid(&uuid)?
                .ok_or_else(|| CommandError::NotFound {
                    kind: "Form data",
                    uuid: uuid.clone(),
                })?;
            vec![entry]
        }
        DataCommand::Import { file } => {
            let data: Vec<FormData> = read_entities(&file)?;
            let count = service.save_all_form_data(&data)?;
            eprintln!("Imported {count} form data record(s).");
            data
        }
        DataCommand::Delete { uuid } => {
            service.delete_form_data(&FormData::new(uuid.as_str(), "", "", ""))?;
            eprintln!("Form data '{}' deleted.", uuid);
            return Ok(());
        }
    };

    let output = formatter.format_form_data(&data)?;
    output_result(&output, format, output_file.as_ref())
}
