//! Credential types for the OpenMRS REST API.
//!
//! Responsibilities:
//! - Hold the username/password pair used for HTTP basic authentication.
//! - Handle serialization of secret values.
//!
//! Invariants:
//! - The password is a `secrecy::SecretString` and is redacted from `Debug` output.
//! - Serialization includes secrets for profile files; secrecy is for runtime safety.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Module for serializing SecretString as strings.
pub(crate) mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize as DeserializeTrait, Serialize as SerializeTrait};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }
}

/// Authentication configuration (HTTP basic auth).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// OpenMRS username.
    pub username: String,
    /// OpenMRS password.
    #[serde(with = "secret_string")]
    pub password: SecretString,
}

impl AuthConfig {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_auth_config_serde_round_trip() {
        let original = AuthConfig::new("admin", SecretString::new("Admin123".to_string().into()));

        let json = serde_json::to_string(&original).unwrap();
        let deserialized: AuthConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.username, "admin");
        assert_eq!(deserialized.password.expose_secret(), "Admin123");
    }

    #[test]
    fn test_auth_config_debug_redacts_password() {
        let auth = AuthConfig::new("admin", SecretString::new("Admin123".to_string().into()));
        let debug = format!("{auth:?}");

        assert!(debug.contains("admin"));
        assert!(!debug.contains("Admin123"));
    }
}
