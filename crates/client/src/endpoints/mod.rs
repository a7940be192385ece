//! REST API endpoint implementations.
//!
//! Endpoints are free functions over a shared `reqwest::Client`; the
//! [`OpenmrsClient`](crate::OpenmrsClient) wrapper supplies the base URL,
//! credentials and retry budget.

pub mod request;
mod resources;
pub mod url_encoding;

pub use request::send_request_with_retry;
pub use resources::fetch_resources;
pub use url_encoding::encode_path_segment;
