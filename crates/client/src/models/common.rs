//! Common types shared across muzima models.
//!
//! This module contains the searchable trait every indexable entity
//! implements and the generic OpenMRS REST wrappers. It does NOT contain
//! resource-specific models.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// An OpenMRS object that can be stored in and looked up from the local index.
///
/// Every OpenMRS object carries a `uuid` and a `uri`; the uri is kept for
/// completeness but nothing reads it.
pub trait OpenmrsSearchable: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Stable kind tag that separates entity types inside the index.
    const KIND: &'static str;

    fn uuid(&self) -> &str;

    fn uri(&self) -> Option<&str>;
}

/// OpenMRS list response: `{ "results": [ ... ] }`.
#[derive(Debug, Deserialize, Clone)]
pub struct RestResults<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// OpenMRS error response: `{ "error": { "message": "...", "code": "..." } }`.
#[derive(Debug, Deserialize, Clone)]
pub struct OpenmrsErrorBody {
    pub error: OpenmrsErrorDetail,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenmrsErrorDetail {
    #[serde(default)]
    pub message: String,
    pub code: Option<String>,
}

impl OpenmrsErrorBody {
    /// Human-readable message, with the server error code when present.
    pub fn display_message(&self) -> String {
        match &self.error.code {
            Some(code) if !code.is_empty() => format!("{} [{}]", self.error.message, code),
            _ => self.error.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_results_wrapper() {
        let json = r#"{"results": [{"uuid": "a"}, {"uuid": "b"}]}"#;
        let results: RestResults<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert_eq!(results.results.len(), 2);
    }

    #[test]
    fn test_error_body_display_message() {
        let json = r#"{"error": {"message": "Object with given uuid doesn't exist", "code": "webservices.rest.ObjectNotFound"}}"#;
        let body: OpenmrsErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(
            body.display_message(),
            "Object with given uuid doesn't exist [webservices.rest.ObjectNotFound]"
        );
    }

    #[test]
    fn test_error_body_without_code() {
        let json = r#"{"error": {"message": "Invalid credentials"}}"#;
        let body: OpenmrsErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.display_message(), "Invalid credentials");
    }
}
