//! Error types for the form service.
//!
//! Callers only need two classes: a malformed query, or an I/O failure
//! (network or local storage). [`Error::is_query_error`] and
//! [`Error::is_io_error`] expose exactly that split.

use muzima_client::ClientError;
use thiserror::Error;

use crate::index::{QueryError, StoreError};
use crate::resource::Resource;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid query: {0}")]
    Query(#[from] QueryError),

    #[error("Local index error: {0}")]
    Store(#[from] StoreError),

    #[error("Remote error: {0}")]
    Remote(#[from] ClientError),

    /// A local-only resource was asked to download.
    #[error("{0} has no remote endpoint")]
    UnknownResource(Resource),

    /// The entity kind does not belong in the resource's partition.
    #[error("{resource} does not hold '{kind}' entities")]
    KindMismatch {
        resource: Resource,
        kind: &'static str,
    },

    /// Both partition deletions of a form failed.
    #[error("Delete incomplete: {first}; then: {second}")]
    DeleteIncomplete {
        first: Box<Error>,
        second: Box<Error>,
    },
}

impl Error {
    pub fn is_query_error(&self) -> bool {
        matches!(self, Self::Query(_))
    }

    /// Everything that is not a query error is I/O class.
    pub fn is_io_error(&self) -> bool {
        !self.is_query_error()
    }

    /// The remote client error behind this error, if any.
    pub fn as_client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Remote(e) => Some(e),
            Self::DeleteIncomplete { first, .. } => first.as_client_error(),
            _ => None,
        }
    }
}
