//! Form metadata as served by the muzima forms REST module.

use serde::{Deserialize, Serialize};

use super::common::OpenmrsSearchable;

/// A clinical form, identified by uuid and searchable by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl Form {
    pub fn new(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            uri: None,
            name: name.into(),
            description: None,
            version: None,
        }
    }
}

impl OpenmrsSearchable for Form {
    const KIND: &'static str = "form";

    fn uuid(&self) -> &str {
        &self.uuid
    }

    fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }
}
