//! Form service layer for the muzima client.
//!
//! This crate ties the REST client to a local, file-backed index:
//! - [`resource`]: named partitions and the remote endpoint behind each
//! - [`index`]: the partitioned document store and its query language
//! - [`dao`]: typed access to one entity kind
//! - [`service`]: the [`FormService`] facade used by front ends

pub mod dao;
pub mod error;
pub mod index;
pub mod resource;
pub mod service;

pub use dao::{FormDao, FormDataDao, FormTemplateDao, SearchableDao};
pub use error::{Error, Result};
pub use index::{LocalIndex, Query, QueryBuilder, QueryError, StoreError};
pub use resource::Resource;
pub use service::FormService;
