//! Centralized constants for the muzima workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed connection timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default maximum number of retries for rate-limited requests.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Upper bound accepted for `max_retries`.
pub const MAX_MAX_RETRIES: usize = 10;

// =============================================================================
// Storage Defaults
// =============================================================================

/// Application name used for platform directories.
pub const APP_NAME: &str = "muzima";

/// Directory below the platform data dir that holds the local index.
pub const INDEX_DIR_NAME: &str = "index";

/// File name of the profile configuration file.
pub const CONFIG_FILE_NAME: &str = "config.json";
