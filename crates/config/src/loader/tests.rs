//! Tests for the configuration loader builder.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Every test clears the `MUZIMA_*` variables it could observe via `temp_env`.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::ExposeSecret;
use serial_test::serial;
use tempfile::TempDir;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::paths::default_data_dir;

const MUZIMA_VARS: [&str; 9] = [
    "MUZIMA_SERVER_URL",
    "MUZIMA_USERNAME",
    "MUZIMA_PASSWORD",
    "MUZIMA_TIMEOUT",
    "MUZIMA_MAX_RETRIES",
    "MUZIMA_SKIP_VERIFY",
    "MUZIMA_DATA_DIR",
    "MUZIMA_CONFIG_PATH",
    "MUZIMA_PROFILE",
];

/// Runs `f` with every `MUZIMA_*` variable unset except the given overrides.
fn with_clean_env<F: FnOnce()>(overrides: &[(&str, &str)], f: F) {
    let vars: Vec<(&str, Option<&str>)> = MUZIMA_VARS
        .iter()
        .map(|key| {
            let value = overrides
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| *v);
            (*key, value)
        })
        .collect();
    temp_env::with_vars(vars, f);
}

fn create_test_config_file(dir: &Path) -> PathBuf {
    let config_path = dir.join("config.json");
    let config = serde_json::json!({
        "profiles": {
            "clinic": {
                "server_url": "https://clinic.example.org/openmrs/",
                "username": "nurse",
                "password": "clinic-password",
                "skip_verify": true,
                "timeout_seconds": 60,
                "max_retries": 5,
                "data_dir": "/var/lib/muzima/clinic"
            },
            "partial": {
                "server_url": "https://partial.example.org"
            }
        }
    });

    let mut file = std::fs::File::create(&config_path).unwrap();
    writeln!(file, "{}", config).unwrap();
    config_path
}

fn complete_loader() -> ConfigLoader {
    ConfigLoader::new()
        .with_server_url("https://demo.muzima.org/openmrs".to_string())
        .with_username("admin".to_string())
        .with_password("test".to_string())
        .with_data_dir(PathBuf::from("/tmp/muzima-index"))
}

#[test]
fn test_build_from_builder_methods() {
    let config = complete_loader()
        .with_timeout(Duration::from_secs(45))
        .with_max_retries(2)
        .with_skip_verify(true)
        .build()
        .unwrap();

    assert_eq!(config.connection.server_url, "https://demo.muzima.org/openmrs");
    assert_eq!(config.connection.timeout, Duration::from_secs(45));
    assert_eq!(config.connection.max_retries, 2);
    assert!(config.connection.skip_verify);
    assert_eq!(config.auth.username, "admin");
    assert_eq!(config.auth.password.expose_secret(), "test");
    assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/muzima-index"));
}

#[test]
fn test_server_url_trailing_slashes_removed() {
    let config = complete_loader()
        .with_server_url("https://demo.muzima.org/openmrs//".to_string())
        .build()
        .unwrap();

    assert_eq!(config.connection.server_url, "https://demo.muzima.org/openmrs");
}

#[test]
fn test_missing_server_url() {
    let err = ConfigLoader::new()
        .with_username("admin".to_string())
        .with_password("test".to_string())
        .build()
        .unwrap_err();

    assert!(matches!(err, ConfigError::MissingServerUrl));
}

#[test]
fn test_blank_server_url_treated_as_missing() {
    let err = complete_loader()
        .with_server_url("   ".to_string())
        .build()
        .unwrap_err();

    assert!(matches!(err, ConfigError::MissingServerUrl));
}

#[test]
fn test_server_url_with_unsupported_scheme() {
    let err = complete_loader()
        .with_server_url("ftp://demo.muzima.org".to_string())
        .build()
        .unwrap_err();

    assert!(matches!(err, ConfigError::InvalidValue { ref var, .. } if var == "server_url"));
}

#[test]
fn test_missing_password_is_missing_auth() {
    let err = ConfigLoader::new()
        .with_server_url("https://demo.muzima.org/openmrs".to_string())
        .with_username("admin".to_string())
        .build()
        .unwrap_err();

    assert!(matches!(err, ConfigError::MissingAuth));
}

#[test]
fn test_zero_timeout_rejected() {
    let err = complete_loader()
        .with_timeout(Duration::from_secs(0))
        .build()
        .unwrap_err();

    assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
}

#[test]
fn test_excessive_max_retries_rejected() {
    let err = complete_loader().with_max_retries(11).build().unwrap_err();

    assert!(matches!(err, ConfigError::InvalidMaxRetries { .. }));
}

#[test]
fn test_default_data_dir_used_when_unset() {
    let config = ConfigLoader::new()
        .with_server_url("https://demo.muzima.org/openmrs".to_string())
        .with_username("admin".to_string())
        .with_password("test".to_string())
        .build()
        .unwrap();

    assert_eq!(config.storage.data_dir, default_data_dir().unwrap());
}

#[test]
#[serial]
fn test_loader_from_profile_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = create_test_config_file(temp_dir.path());

    with_clean_env(&[], || {
        let config = ConfigLoader::new()
            .with_profile_name("clinic".to_string())
            .with_config_path(config_path.clone())
            .from_profile()
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(
            config.connection.server_url,
            "https://clinic.example.org/openmrs"
        );
        assert_eq!(config.auth.username, "nurse");
        assert_eq!(config.auth.password.expose_secret(), "clinic-password");
        assert!(config.connection.skip_verify);
        assert_eq!(config.connection.timeout, Duration::from_secs(60));
        assert_eq!(config.connection.max_retries, 5);
        assert_eq!(
            config.storage.data_dir,
            PathBuf::from("/var/lib/muzima/clinic")
        );
    });
}

#[test]
#[serial]
fn test_env_overrides_profile() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = create_test_config_file(temp_dir.path());

    with_clean_env(
        &[
            ("MUZIMA_SERVER_URL", "https://override.example.org"),
            ("MUZIMA_USERNAME", "clerk"),
        ],
        || {
            let config = ConfigLoader::new()
                .with_profile_name("clinic".to_string())
                .with_config_path(config_path.clone())
                .from_profile()
                .unwrap()
                .from_env()
                .unwrap()
                .build()
                .unwrap();

            assert_eq!(config.connection.server_url, "https://override.example.org");
            assert_eq!(config.auth.username, "clerk");
            // Untouched by env, still from the profile
            assert_eq!(config.auth.password.expose_secret(), "clinic-password");
        },
    );
}

#[test]
#[serial]
fn test_profile_name_and_path_from_env() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = create_test_config_file(temp_dir.path());
    let config_path_str = config_path.to_string_lossy().to_string();

    with_clean_env(
        &[
            ("MUZIMA_CONFIG_PATH", config_path_str.as_str()),
            ("MUZIMA_PROFILE", "clinic"),
        ],
        || {
            let config = ConfigLoader::new()
                .from_env()
                .unwrap()
                .from_profile()
                .unwrap()
                .build()
                .unwrap();

            assert_eq!(config.auth.username, "nurse");
        },
    );
}

#[test]
#[serial]
fn test_missing_profile_reported_when_config_incomplete() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = create_test_config_file(temp_dir.path());

    with_clean_env(&[], || {
        let err = ConfigLoader::new()
            .with_profile_name("nonexistent".to_string())
            .with_config_path(config_path.clone())
            .from_profile()
            .unwrap()
            .build()
            .unwrap_err();

        assert!(matches!(err, ConfigError::ProfileNotFound(ref name) if name == "nonexistent"));
    });
}

#[test]
#[serial]
fn test_missing_profile_suppressed_when_env_complete() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = create_test_config_file(temp_dir.path());

    with_clean_env(
        &[
            ("MUZIMA_SERVER_URL", "https://demo.muzima.org/openmrs"),
            ("MUZIMA_USERNAME", "admin"),
            ("MUZIMA_PASSWORD", "test"),
            ("MUZIMA_DATA_DIR", "/tmp/muzima-env"),
        ],
        || {
            let config = ConfigLoader::new()
                .with_profile_name("nonexistent".to_string())
                .with_config_path(config_path.clone())
                .from_profile()
                .unwrap()
                .from_env()
                .unwrap()
                .build()
                .unwrap();

            assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/muzima-env"));
        },
    );
}

#[test]
#[serial]
fn test_partial_profile_still_requires_auth() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = create_test_config_file(temp_dir.path());

    with_clean_env(&[], || {
        let err = ConfigLoader::new()
            .with_profile_name("partial".to_string())
            .with_config_path(config_path.clone())
            .from_profile()
            .unwrap()
            .build()
            .unwrap_err();

        assert!(matches!(err, ConfigError::MissingAuth));
    });
}

#[test]
fn test_malformed_profile_file_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.json");
    std::fs::write(&config_path, "{ not json").unwrap();

    let result = ConfigLoader::new()
        .with_profile_name("clinic".to_string())
        .with_config_path(config_path)
        .from_profile();

    assert!(matches!(result, Err(ConfigError::ConfigFileParse { .. })));
}

#[test]
#[serial]
fn test_invalid_env_values_rejected() {
    with_clean_env(&[("MUZIMA_SKIP_VERIFY", "sometimes")], || {
        let result = ConfigLoader::new().from_env();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref var, .. }) if var == "MUZIMA_SKIP_VERIFY"
        ));
    });

    with_clean_env(&[("MUZIMA_MAX_RETRIES", "-1")], || {
        let result = ConfigLoader::new().from_env();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref var, .. }) if var == "MUZIMA_MAX_RETRIES"
        ));
    });
}

#[test]
#[serial]
fn test_dotenv_disabled_skips_loading() {
    temp_env::with_vars([("DOTENV_DISABLED", Some("1"))], || {
        assert!(ConfigLoader::new().load_dotenv().is_ok());
    });
}
