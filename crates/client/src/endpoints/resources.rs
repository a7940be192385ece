//! Generic resource download.
//!
//! The muzima forms module answers a uuid lookup with a single object and a
//! search with `{ "results": [...] }`. Some deployments return a bare array.
//! All three shapes decode into a `Vec<T>`.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::auth::Credentials;
use crate::endpoints::send_request_with_retry;
use crate::error::{ClientError, Result};
use crate::models::RestResults;

/// GET a fully resolved resource URL and decode every entity in the body.
pub async fn fetch_resources<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    credentials: &Credentials,
    max_retries: usize,
) -> Result<Vec<T>> {
    debug!(url = %url, user = %credentials.username(), "Fetching resources");

    let builder = credentials.apply(client.get(url).header("Accept", "application/json"));
    let response = send_request_with_retry(builder, max_retries).await?;
    let body: Value = response.json().await?;

    decode_entities(body)
}

fn decode_entities<T: DeserializeOwned>(body: Value) -> Result<Vec<T>> {
    match body {
        Value::Object(map) if map.contains_key("results") => {
            let wrapped: RestResults<T> = decode(Value::Object(map))?;
            Ok(wrapped.results)
        }
        Value::Object(map) => Ok(vec![decode(Value::Object(map))?]),
        Value::Array(items) => decode(Value::Array(items)),
        other => Err(ClientError::InvalidResponse(format!(
            "expected an object or array, got {}",
            type_name(&other)
        ))),
    }
}

fn decode<D: DeserializeOwned>(value: Value) -> Result<D> {
    serde_json::from_value(value)
        .map_err(|e| ClientError::InvalidResponse(format!("failed to decode entity: {e}")))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
