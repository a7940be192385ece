//! Form template definitions.
//!
//! A template shares its uuid with the [`Form`](super::Form) it renders and
//! carries the representation requested by the template resolver: the XML
//! model, its JSON rendering and the HTML form.

use serde::{Deserialize, Serialize};

use super::common::OpenmrsSearchable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormTemplate {
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub model_json: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
}

impl FormTemplate {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            uri: None,
            model: None,
            model_json: None,
            html: None,
        }
    }
}

impl OpenmrsSearchable for FormTemplate {
    const KIND: &'static str = "form_template";

    fn uuid(&self) -> &str {
        &self.uuid
    }

    fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_template_camel_case() {
        let json = r#"{
            "uuid": "c5b8d3f2-7a1e-4c1b-9a3e-1f2d3c4b5a69",
            "model": "<model/>",
            "modelJson": "{\"form\":{}}",
            "html": "<form></form>"
        }"#;
        let template: FormTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(template.model.as_deref(), Some("<model/>"));
        assert_eq!(template.model_json.as_deref(), Some("{\"form\":{}}"));
        assert_eq!(template.html.as_deref(), Some("<form></form>"));
    }

    #[test]
    fn test_serialize_uses_model_json_key() {
        let mut template = FormTemplate::new("abc");
        template.model_json = Some("{}".to_string());
        let json = serde_json::to_value(&template).unwrap();
        assert_eq!(json["modelJson"], "{}");
    }
}
