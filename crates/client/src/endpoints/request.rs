//! Retry helper for HTTP requests with exponential backoff.
//!
//! Requests that fail with HTTP 429 (Too Many Requests) are retried with
//! exponential backoff. Any other non-success status is turned into
//! [`ClientError::ApiError`], unwrapping the OpenMRS error body when present.

use reqwest::{RequestBuilder, Response};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::models::OpenmrsErrorBody;

/// Retry budget used when the caller passes zero.
const DEFAULT_MAX_RETRIES: usize = 3;

/// Sends an HTTP request, retrying HTTP 429 responses.
///
/// Backoff is `2^attempt` seconds (1s, 2s, 4s, ...).
///
/// # Errors
///
/// - `ClientError::MaxRetriesExceeded` when all attempts were rate limited.
/// - `ClientError::ApiError` for any other non-success status.
/// - `ClientError::HttpError` for transport failures.
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
) -> Result<Response> {
    let max_retries = if max_retries == 0 {
        DEFAULT_MAX_RETRIES
    } else {
        max_retries
    };

    for attempt in 0..=max_retries {
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None => {
                if attempt == 0 {
                    debug!("Request builder cannot be cloned, single attempt only");
                    return builder.send().await.map_err(ClientError::from);
                }
                return Err(ClientError::MaxRetriesExceeded(attempt));
            }
        };

        match attempt_builder.send().await {
            Ok(response) if response.status().as_u16() == 429 => {
                if attempt < max_retries {
                    let backoff_secs = 2u64.pow(attempt as u32);
                    debug!(
                        attempt = attempt + 1,
                        max_retries = max_retries + 1,
                        backoff_secs = backoff_secs,
                        "Rate limited (HTTP 429), retrying with exponential backoff"
                    );
                    tokio::time::sleep(tokio::time::Duration::from_secs(backoff_secs)).await;
                } else {
                    debug!(
                        attempts = attempt + 1,
                        "Max retries exhausted for rate-limited request"
                    );
                    return Err(ClientError::MaxRetriesExceeded(max_retries + 1));
                }
            }
            Ok(response) if response.status().is_success() => {
                if attempt > 0 {
                    debug!(attempt = attempt + 1, "Request succeeded after retry");
                }
                return Ok(response);
            }
            Ok(response) => return Err(api_error(response).await),
            Err(e) => return Err(ClientError::from(e)),
        }
    }

    Err(ClientError::MaxRetriesExceeded(max_retries + 1))
}

async fn api_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    let message = match serde_json::from_str::<OpenmrsErrorBody>(&body) {
        Ok(parsed) => parsed.display_message(),
        Err(_) => body,
    };

    if status == 401 {
        return ClientError::AuthFailed(message);
    }

    ClientError::ApiError {
        status,
        url,
        message,
    }
}
