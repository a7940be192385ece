//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not load configuration (see `main`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;

#[derive(Parser)]
#[command(name = "muzima-cli")]
#[command(about = "muzima CLI - Download and manage OpenMRS forms locally", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  muzima-cli forms download --name registration\n  muzima-cli forms list\n  muzima-cli templates download c5b8d3f2-7a1e-4c1b-9a3e-1f2d3c4b5a69\n  muzima-cli data list --status incomplete --patient p-1\n  muzima-cli index search form_data 'status:complete AND userUuid:u-1'\n"
)]
pub struct Cli {
    /// Base URL of the OpenMRS server (e.g., https://openmrs.example.org/openmrs)
    #[arg(short, long, global = true, env = "MUZIMA_SERVER_URL")]
    pub server_url: Option<String>,

    /// Username for HTTP basic authentication
    #[arg(short, long, global = true, env = "MUZIMA_USERNAME")]
    pub username: Option<String>,

    /// Password for HTTP basic authentication
    #[arg(
        short,
        long,
        global = true,
        env = "MUZIMA_PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "MUZIMA_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Maximum number of retries for rate-limited requests
    #[arg(long, global = true, env = "MUZIMA_MAX_RETRIES")]
    pub max_retries: Option<usize>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true, env = "MUZIMA_SKIP_VERIFY")]
    pub skip_verify: bool,

    /// Directory holding the local form index
    #[arg(long, global = true, env = "MUZIMA_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Profile name to load from config file
    #[arg(long, global = true, env = "MUZIMA_PROFILE")]
    pub profile: Option<String>,

    /// Path to a custom configuration file (overrides default location)
    #[arg(long, global = true, env = "MUZIMA_CONFIG_PATH", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Output format (json, table)
    #[arg(short, long, global = true, default_value = "table")]
    pub output: String,

    /// Output file path (saves results to file instead of stdout)
    #[arg(long, global = true, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download, list and delete forms
    Forms {
        #[command(subcommand)]
        command: commands::forms::FormsCommand,
    },

    /// Download, import and manage form templates
    Templates {
        #[command(subcommand)]
        command: commands::templates::TemplatesCommand,
    },

    /// Import and query locally captured form data
    Data {
        #[command(subcommand)]
        command: commands::data::DataCommand,
    },

    /// Query the local index directly
    Index {
        #[command(subcommand)]
        command: commands::index::IndexCommand,
    },
}
