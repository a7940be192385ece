//! Resolvers turn a server base URL and a search term into a concrete
//! muzima REST URL.
//!
//! Responsibilities:
//! - Build the URL for each remote resource (form by uuid, form by name,
//!   template by uuid).
//! - Select the custom representation the server should return.
//! - Percent-encode the search term for its position in the URL.
//!
//! Does NOT handle:
//! - Sending requests (see [`crate::OpenmrsClient::download`]).
//! - Base URL normalization (see [`crate::OpenmrsClientBuilder`]).
//!
//! Invariants:
//! - The server base URL never carries a trailing slash.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::endpoints::encode_path_segment;

/// Path of the muzima forms module below the server root.
pub const MUZIMA_FORMS_PATH: &str = "/ws/rest/v1/muzimaforms/form";

/// Representation for form metadata lookups.
pub const FORM_REPRESENTATION: &str = "custom:(uuid,name,description,version)";

/// Representation for template lookups.
pub const FORM_TEMPLATE_REPRESENTATION: &str = "custom:(uuid,model,modelJson,html)";

/// Characters left unescaped in query values (RFC 3986 unreserved).
const QUERY_VALUE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Maps a search term to the URL of a remote resource.
pub trait Resolver: Send + Sync {
    fn resolve(&self, server: &str, search: &str) -> String;
}

/// Looks up a single form by uuid.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidFormResolver;

impl Resolver for UuidFormResolver {
    fn resolve(&self, server: &str, search: &str) -> String {
        format!(
            "{}{}/{}?v={}",
            server,
            MUZIMA_FORMS_PATH,
            encode_path_segment(search),
            FORM_REPRESENTATION
        )
    }
}

/// Lists forms, narrowed by name when the search term is non-empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchFormResolver;

impl Resolver for SearchFormResolver {
    fn resolve(&self, server: &str, search: &str) -> String {
        let mut url = format!("{}{}?v={}", server, MUZIMA_FORMS_PATH, FORM_REPRESENTATION);
        if !search.is_empty() {
            url.push_str("&q=");
            url.push_str(&utf8_percent_encode(search, QUERY_VALUE_ENCODE_SET).to_string());
        }
        url
    }
}

/// Looks up the template of a form by the form's uuid.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidFormTemplateResolver;

impl Resolver for UuidFormTemplateResolver {
    fn resolve(&self, server: &str, search: &str) -> String {
        format!(
            "{}{}/{}?v={}",
            server,
            MUZIMA_FORMS_PATH,
            encode_path_segment(search),
            FORM_TEMPLATE_REPRESENTATION
        )
    }
}
