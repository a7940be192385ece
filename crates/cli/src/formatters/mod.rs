//! Output formatters for CLI results.
//!
//! Responsibilities:
//! - Define the [`Formatter`] trait implemented by each output format.
//! - Parse the `--output` flag into an [`OutputFormat`].
//!
//! Does NOT handle:
//! - Fetching data (see `commands`).
//!
//! Invariants:
//! - Every formatter renders an empty list as a message, never as nothing.

mod common;
mod json;
mod table;

use anyhow::Result;
use muzima_client::{Form, FormData, FormTemplate};

pub use common::output_result;
pub use json::JsonFormatter;
pub use table::TableFormatter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

impl OutputFormat {
    /// Parse from string.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => anyhow::bail!("Invalid output format: {}. Valid options: json, table", s),
        }
    }
}

/// Formatter trait for different output types.
pub trait Formatter {
    fn format_forms(&self, forms: &[Form]) -> Result<String>;

    fn format_form_templates(&self, templates: &[FormTemplate]) -> Result<String>;

    /// A single template including its model and HTML.
    fn format_form_template(&self, template: &FormTemplate) -> Result<String>;

    fn format_form_data(&self, data: &[FormData]) -> Result<String>;

    /// Raw index payloads.
    fn format_search_results(&self, results: &[serde_json::Value]) -> Result<String>;
}

/// Get a formatter for the specified format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
    }
}
