//! Configuration management for the muzima form client.
//!
//! This crate provides types and loaders for the server connection,
//! credentials and local index location, read from environment variables,
//! `.env` files and JSON profile files.

pub mod constants;
mod loader;
mod paths;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use paths::{default_config_path, default_data_dir};
pub use types::{AuthConfig, Config, ConfigFile, ConnectionConfig, ProfileConfig, StorageConfig};
