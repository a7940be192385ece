//! Named resources (partitions) the form service reads from and writes to.
//!
//! Responsibilities:
//! - Name every partition of the local index.
//! - Pair remote resources with the resolver that builds their URL.
//! - Record which entity kind each partition holds.
//!
//! Does NOT handle:
//! - Storage of documents (see [`crate::index`]).
//! - HTTP requests (see `muzima_client`).
//!
//! Invariants:
//! - Partition keys are valid file stems (`[a-z_]+`).
//! - Only remote resources return a resolver.

use std::fmt;

use muzima_client::{
    Form, FormData, FormTemplate, OpenmrsSearchable, Resolver, SearchFormResolver,
    UuidFormResolver, UuidFormTemplateResolver,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// A single form downloaded by uuid.
    UuidForm,
    /// Forms downloaded by name search.
    SearchForm,
    /// A form template downloaded by the uuid of its form.
    UuidFormTemplate,
    /// Templates saved locally.
    LocalFormTemplate,
    /// Form data captured on this device.
    LocalFormData,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::UuidForm,
        Resource::SearchForm,
        Resource::UuidFormTemplate,
        Resource::LocalFormTemplate,
        Resource::LocalFormData,
    ];

    /// Human-readable name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Resource::UuidForm => "Uuid Form Resource",
            Resource::SearchForm => "Search Form Resource",
            Resource::UuidFormTemplate => "Uuid Form Template Resource",
            Resource::LocalFormTemplate => "Local Form Template Resource",
            Resource::LocalFormData => "Local Form Data Resource",
        }
    }

    /// File stem of the partition on disk.
    pub fn partition(&self) -> &'static str {
        match self {
            Resource::UuidForm => "uuid_form",
            Resource::SearchForm => "search_form",
            Resource::UuidFormTemplate => "uuid_form_template",
            Resource::LocalFormTemplate => "local_form_template",
            Resource::LocalFormData => "local_form_data",
        }
    }

    /// Entity kind stored in this partition.
    pub fn kind(&self) -> &'static str {
        match self {
            Resource::UuidForm | Resource::SearchForm => Form::KIND,
            Resource::UuidFormTemplate | Resource::LocalFormTemplate => FormTemplate::KIND,
            Resource::LocalFormData => FormData::KIND,
        }
    }

    /// URL builder for remote resources; `None` for local-only ones.
    pub fn resolver(&self) -> Option<&'static dyn Resolver> {
        match self {
            Resource::UuidForm => Some(&UuidFormResolver),
            Resource::SearchForm => Some(&SearchFormResolver),
            Resource::UuidFormTemplate => Some(&UuidFormTemplateResolver),
            Resource::LocalFormTemplate | Resource::LocalFormData => None,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
