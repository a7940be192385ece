//! Shared test utilities for muzima-cli integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Point every command at its own temporary data directory.
//!
//! Invariants / Assumptions:
//! - Credentials are set to `admin` / `test` unless overridden.
//! - The server URL points at a closed port unless overridden.

use assert_cmd::Command;
use std::path::Path;

/// Basic auth header for `admin` / `test`.
#[allow(dead_code)]
pub const BASIC_AUTH_HEADER: &str = "Basic YWRtaW46dGVzdA==";

#[allow(dead_code)]
pub const FORMS_PATH: &str = "/ws/rest/v1/muzimaforms/form";

/// Returns a hermetic `muzima-cli` command using `data_dir` for the local index.
pub fn muzima_cmd(data_dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("muzima-cli");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    cmd.env("MUZIMA_SERVER_URL", "http://127.0.0.1:9")
        .env("MUZIMA_USERNAME", "admin")
        .env("MUZIMA_PASSWORD", "test")
        .env("MUZIMA_MAX_RETRIES", "0")
        .env("MUZIMA_DATA_DIR", data_dir);

    cmd.env_remove("MUZIMA_PROFILE")
        .env_remove("MUZIMA_CONFIG_PATH")
        .env_remove("MUZIMA_TIMEOUT")
        .env_remove("MUZIMA_SKIP_VERIFY")
        .env_remove("RUST_LOG");

    cmd
}

/// Returns a hermetic `muzima-cli` command talking to `server_url`.
#[allow(dead_code)]
pub fn muzima_cmd_with_server(data_dir: &Path, server_url: &str) -> Command {
    let mut cmd = muzima_cmd(data_dir);
    cmd.env("MUZIMA_SERVER_URL", server_url);
    cmd
}
