//! OpenMRS REST API client for muzima forms.
//!
//! This crate provides the wire models for forms, form templates and form
//! data, the resolvers that turn identifiers into REST resource URIs, and a
//! small client that downloads those resources with HTTP basic auth.

mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod resolver;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use auth::Credentials;
pub use client::OpenmrsClient;
pub use client::builder::OpenmrsClientBuilder;
pub use error::{ClientError, Result};
pub use models::{Form, FormData, FormTemplate, OpenmrsSearchable};
pub use resolver::{Resolver, SearchFormResolver, UuidFormResolver, UuidFormTemplateResolver};
