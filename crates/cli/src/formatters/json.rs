//! JSON formatter implementation.

use anyhow::Result;
use muzima_client::{Form, FormData, FormTemplate};

use crate::formatters::Formatter;

/// Pretty-printed JSON, one document per command.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_forms(&self, forms: &[Form]) -> Result<String> {
        Ok(with_newline(serde_json::to_string_pretty(forms)?))
    }

    fn format_form_templates(&self, templates: &[FormTemplate]) -> Result<String> {
        Ok(with_newline(serde_json::to_string_pretty(templates)?))
    }

    fn format_form_template(&self, template: &FormTemplate) -> Result<String> {
        Ok(with_newline(serde_json::to_string_pretty(template)?))
    }

    fn format_form_data(&self, data: &[FormData]) -> Result<String> {
        Ok(with_newline(serde_json::to_string_pretty(data)?))
    }

    fn format_search_results(&self, results: &[serde_json::Value]) -> Result<String> {
        Ok(with_newline(serde_json::to_string_pretty(results)?))
    }
}

fn with_newline(mut s: String) -> String {
    s.push('\n');
    s
}
