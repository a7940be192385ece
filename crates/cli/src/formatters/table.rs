//! Table formatter implementation.
//!
//! Responsibilities:
//! - Format entities as tab-separated tables.
//!
//! Does NOT handle:
//! - Other output formats.
//! - File I/O.

use anyhow::Result;
use muzima_client::{Form, FormData, FormTemplate};

use crate::formatters::Formatter;
use crate::formatters::common::{format_json_value, format_missing};

/// Table formatter.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_forms(&self, forms: &[Form]) -> Result<String> {
        if forms.is_empty() {
            return Ok("No forms found.\n".to_string());
        }

        let mut output = String::from("UUID\tName\tVersion\tDescription\n");
        for form in forms {
            output.push_str(&format!(
                "{}\t{}\t{}\t{}\n",
                form.uuid,
                form.name,
                format_missing(form.version.as_deref()),
                format_missing(form.description.as_deref()),
            ));
        }
        Ok(output)
    }

    fn format_form_templates(&self, templates: &[FormTemplate]) -> Result<String> {
        if templates.is_empty() {
            return Ok("No form templates found.\n".to_string());
        }

        let mut output = String::from("UUID\tModel\tModel JSON\tHTML\n");
        for template in templates {
            output.push_str(&format!(
                "{}\t{}\t{}\t{}\n",
                template.uuid,
                presence(&template.model),
                presence(&template.model_json),
                presence(&template.html),
            ));
        }
        Ok(output)
    }

    fn format_form_template(&self, template: &FormTemplate) -> Result<String> {
        let mut output = format!("UUID: {}\n", template.uuid);
        for (label, section) in [
            ("Model", &template.model),
            ("Model JSON", &template.model_json),
            ("HTML", &template.html),
        ] {
            output.push_str(&format!("\n{}:\n", label));
            output.push_str(format_missing(section.as_deref()));
            output.push('\n');
        }
        Ok(output)
    }

    fn format_form_data(&self, data: &[FormData]) -> Result<String> {
        if data.is_empty() {
            return Ok("No form data found.\n".to_string());
        }

        let mut output = String::from("UUID\tStatus\tPatient\tUser\tTemplate\n");
        for entry in data {
            output.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\n",
                entry.uuid,
                entry.status,
                entry.patient_uuid,
                entry.user_uuid,
                format_missing(entry.template_uuid.as_deref()),
            ));
        }
        Ok(output)
    }

    fn format_search_results(&self, results: &[serde_json::Value]) -> Result<String> {
        if results.is_empty() {
            return Ok("No results found.\n".to_string());
        }

        let mut output = String::new();

        let mut all_keys: Vec<String> = Vec::new();
        for result in results {
            if let Some(obj) = result.as_object() {
                for key in obj.keys() {
                    if !all_keys.contains(key) {
                        all_keys.push(key.clone());
                    }
                }
            }
        }
        all_keys.sort();

        output.push_str(&all_keys.join("\t"));
        output.push('\n');

        for result in results {
            if let Some(obj) = result.as_object() {
                let row: Vec<String> = all_keys
                    .iter()
                    .map(|key| obj.get(key).map(format_json_value).unwrap_or_default())
                    .collect();
                output.push_str(&row.join("\t"));
                output.push('\n');
            }
        }

        Ok(output)
    }
}

/// Templates carry large documents; tables only say whether each is present.
fn presence(section: &Option<String>) -> &'static str {
    if section.as_deref().is_some_and(|s| !s.is_empty()) {
        "yes"
    } else {
        "no"
    }
}
