//! OpenMRS REST client for muzima resources.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//!
//! # What this module does NOT handle:
//! - URL construction for a resource (delegated to [`crate::resolver`])
//! - Request retries and response decoding (delegated to [`crate::endpoints`])
//!
//! # Invariants
//! - Every request carries HTTP basic auth built from [`Credentials`]
//! - `base_url` never ends with a slash

pub mod builder;

use tracing::debug;

use crate::auth::Credentials;
use crate::endpoints;
use crate::error::Result;
use crate::resolver::Resolver;
use serde::de::DeserializeOwned;

/// OpenMRS REST API client.
///
/// ```rust,ignore
/// use muzima_client::{OpenmrsClient, Credentials, UuidFormTemplateResolver, FormTemplate};
/// use secrecy::SecretString;
///
/// let client = OpenmrsClient::builder()
///     .base_url("https://demo.muzima.org/openmrs".to_string())
///     .credentials(Credentials::new("admin", SecretString::new("test".to_string().into())))
///     .build()?;
/// let templates: Vec<FormTemplate> = client.download(&UuidFormTemplateResolver, uuid).await?;
/// ```
#[derive(Debug)]
pub struct OpenmrsClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) credentials: Credentials,
    pub(crate) max_retries: usize,
}

impl OpenmrsClient {
    /// Create a new client builder.
    pub fn builder() -> builder::OpenmrsClientBuilder {
        builder::OpenmrsClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Name of the user requests are made as.
    pub fn username(&self) -> &str {
        self.credentials.username()
    }

    /// Resolve `search` to a URL and download every entity the server returns.
    pub async fn download<T: DeserializeOwned>(
        &self,
        resolver: &dyn Resolver,
        search: &str,
    ) -> Result<Vec<T>> {
        let url = resolver.resolve(&self.base_url, search);
        debug!(url = %url, "Downloading resource");
        endpoints::fetch_resources(&self.http, &url, &self.credentials, self.max_retries).await
    }
}
