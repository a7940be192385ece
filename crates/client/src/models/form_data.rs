//! Captured form data instances.

use serde::{Deserialize, Serialize};

use super::common::OpenmrsSearchable;

/// One filled-in form, owned by a patient and the user who captured it.
///
/// `status` is free-form (e.g. `"incomplete"`, `"complete"`, `"synced"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default)]
    pub patient_uuid: String,
    #[serde(default)]
    pub user_uuid: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub template_uuid: Option<String>,
    #[serde(default)]
    pub payload: Option<String>,
}

impl FormData {
    pub fn new(
        uuid: impl Into<String>,
        patient_uuid: impl Into<String>,
        user_uuid: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            uri: None,
            patient_uuid: patient_uuid.into(),
            user_uuid: user_uuid.into(),
            status: status.into(),
            template_uuid: None,
            payload: None,
        }
    }
}

impl OpenmrsSearchable for FormData {
    const KIND: &'static str = "form_data";

    fn uuid(&self) -> &str {
        &self.uuid
    }

    fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }
}
