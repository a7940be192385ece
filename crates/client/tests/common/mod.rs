//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - Test credentials are `admin` / `test`
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

use std::time::Duration;

#[allow(unused_imports)]
pub use muzima_client::testing::load_fixture;

#[allow(unused_imports)]
pub use muzima_client::{Credentials, OpenmrsClient};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// `Authorization` header value for `admin:test`.
#[allow(dead_code)]
pub const BASIC_AUTH_HEADER: &str = "Basic YWRtaW46dGVzdA==";

/// Path of the forms resource below the server root.
#[allow(dead_code)]
pub const FORMS_PATH: &str = "/ws/rest/v1/muzimaforms/form";

/// Build a client pointed at the mock server with test credentials.
#[allow(dead_code)]
pub fn test_client(server: &MockServer) -> OpenmrsClient {
    OpenmrsClient::builder()
        .base_url(server.uri())
        .credentials(Credentials::new(
            "admin",
            secrecy::SecretString::new("test".to_string().into()),
        ))
        .max_retries(2)
        .build()
        .expect("client should build")
}

/// Advance Tokio's paused clock and yield so sleepers can observe the change.
#[allow(dead_code)]
pub async fn advance_and_yield(duration: Duration) {
    tokio::time::advance(duration).await;
    tokio::task::yield_now().await;
}

/// Assert that a task has not completed after yielding to the scheduler.
#[allow(dead_code)]
pub async fn assert_pending<T>(handle: &tokio::task::JoinHandle<T>, context: &str) {
    tokio::task::yield_now().await;
    assert!(!handle.is_finished(), "Expected pending task: {}", context);
}
