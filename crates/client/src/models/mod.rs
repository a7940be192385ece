//! Data models for muzima form resources.
//!
//! This module is organized by resource type:
//! - `common`: the searchable trait and REST response wrappers
//! - `form`: form metadata
//! - `form_template`: form template definitions
//! - `form_data`: captured form data instances

pub mod common;
pub mod form;
pub mod form_data;
pub mod form_template;

pub use common::{OpenmrsErrorBody, OpenmrsSearchable, RestResults};
pub use form::Form;
pub use form_data::FormData;
pub use form_template::FormTemplate;
