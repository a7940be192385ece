//! Rate limit (429) retry behavior tests.
//!
//! # Invariants
//! - 429 responses trigger retry with exponential backoff (1s, 2s, ...)
//! - Other error statuses are never retried

mod common;

use common::*;
use muzima_client::{ClientError, Form, UuidFormResolver};
use std::time::Duration;
use wiremock::matchers::{method, path};

#[tokio::test(start_paused = true)]
async fn test_retry_on_429_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{FORMS_PATH}/abc")))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{FORMS_PATH}/abc")))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("forms/form.json")))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let handle = tokio::spawn(async move { client.download::<Form>(&UuidFormResolver, "abc").await });

    assert_pending(&handle, "429 retry should wait for backoff").await;
    advance_and_yield(Duration::from_secs(1)).await;
    assert_pending(&handle, "second 429 retry should wait for backoff").await;
    advance_and_yield(Duration::from_secs(2)).await;
    let result = handle.await.expect("download task");

    let forms = result.unwrap();
    assert_eq!(forms[0].name, "Patient Registration");
}

#[tokio::test(start_paused = true)]
async fn test_retry_on_429_exhaustion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{FORMS_PATH}/abc")))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let handle = tokio::spawn(async move { client.download::<Form>(&UuidFormResolver, "abc").await });

    advance_and_yield(Duration::from_secs(1)).await;
    advance_and_yield(Duration::from_secs(2)).await;
    let result = handle.await.expect("download task");

    assert!(matches!(result, Err(ClientError::MaxRetriesExceeded(3))));
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{FORMS_PATH}/abc")))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .download::<Form>(&UuidFormResolver, "abc")
        .await
        .unwrap_err();

    match err {
        ClientError::ApiError { status, message, .. } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}
