//! Configuration type definitions.
//!
//! Responsibilities:
//! - Define configuration types for credentials, connection, storage and profiles.
//! - Provide serialization helpers for sensitive types (secrets, durations).
//!
//! Does NOT handle:
//! - Configuration loading from files or environment variables (see `loader` module).
//! - Actual network connections or index access (see the client and api crates).
//!
//! Invariants:
//! - All secret types use `secrecy::SecretString` to prevent accidental logging.
//! - Serialization helpers (`secret_string`, `duration_seconds`) are private modules.

mod auth;
mod connection;
mod profile;
mod storage;

pub use auth::AuthConfig;
pub use connection::{Config, ConnectionConfig};
pub use profile::{ConfigFile, ProfileConfig};
pub use storage::StorageConfig;
