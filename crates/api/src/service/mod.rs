//! The form service facade.
//!
//! Responsibilities:
//! - Expose form, template and form data operations to front ends.
//! - Route each operation to its DAO with the right [`Resource`].
//!
//! Does NOT handle:
//! - Validation or transformation of entities. Everything is passed through.
//! - Retries. Errors propagate as they are.
//!
//! Invariants:
//! - Lookups return `None` or an empty list when nothing matches.
//! - `delete_form` always attempts both form partitions.

use std::sync::Arc;

use muzima_client::{Form, FormData, FormTemplate, OpenmrsClient};
use muzima_config::Config;
use serde_json::Value;
use tracing::warn;

use crate::dao::{FormDao, FormDataDao, FormTemplateDao};
use crate::error::{Error, Result};
use crate::index::{LocalIndex, Query};
use crate::resource::Resource;

#[derive(Debug)]
pub struct FormService {
    index: Arc<LocalIndex>,
    forms: FormDao,
    templates: FormTemplateDao,
    data: FormDataDao,
}

impl FormService {
    pub fn new(index: LocalIndex, client: OpenmrsClient) -> Self {
        let index = Arc::new(index);
        let client = Arc::new(client);
        Self {
            forms: FormDao::new(index.clone(), client.clone()),
            templates: FormTemplateDao::new(index.clone(), client.clone()),
            data: FormDataDao::new(index.clone(), client),
            index,
        }
    }

    /// Build the REST client and open the index described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = OpenmrsClient::builder().from_config(config).build()?;
        let index = LocalIndex::open(&config.storage.data_dir)?;
        Ok(Self::new(index, client))
    }

    pub fn index(&self) -> &LocalIndex {
        &self.index
    }

    // Forms

    pub async fn download_form_by_uuid(&self, uuid: &str) -> Result<Option<Form>> {
        self.forms.download(uuid, Resource::UuidForm).await?;
        self.get_form_by_uuid(uuid)
    }

    /// Download forms whose name matches; an empty name downloads all forms.
    pub async fn download_forms_by_name(&self, name: &str) -> Result<Vec<Form>> {
        self.forms.download(name, Resource::SearchForm).await?;
        self.get_form_by_name(name)
    }

    pub fn get_form_by_uuid(&self, uuid: &str) -> Result<Option<Form>> {
        self.forms.get_by_uuid(uuid)
    }

    pub fn get_form_by_name(&self, name: &str) -> Result<Vec<Form>> {
        self.forms.get_by_name(name)
    }

    pub fn get_all_forms(&self) -> Result<Vec<Form>> {
        self.forms.get_all()
    }

    /// Remove a form from both the search and the uuid partitions.
    ///
    /// # Errors
    ///
    /// The failing deletion's error when only one fails;
    /// [`Error::DeleteIncomplete`] carrying both when both fail.
    pub fn delete_form(&self, form: &Form) -> Result<()> {
        let first = self.forms.delete(form, Resource::SearchForm);
        if let Err(e) = &first {
            warn!(
                uuid = %form.uuid,
                error = %e,
                "Failed to delete form from {}, continuing with {}",
                Resource::SearchForm,
                Resource::UuidForm
            );
        }
        let second = self.forms.delete(form, Resource::UuidForm);

        match (first, second) {
            (Ok(()), Ok(())) => Ok(()),
            (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
            (Err(first), Err(second)) => Err(Error::DeleteIncomplete {
                first: Box::new(first),
                second: Box::new(second),
            }),
        }
    }

    // Form templates

    pub async fn download_form_template_by_uuid(
        &self,
        uuid: &str,
    ) -> Result<Option<FormTemplate>> {
        self.templates
            .download(uuid, Resource::UuidFormTemplate)
            .await?;
        self.get_form_template_by_uuid(uuid)
    }

    pub fn save_form_template(&self, template: &FormTemplate) -> Result<()> {
        self.templates.save(template, Resource::LocalFormTemplate)
    }

    /// Save many templates locally in one write. Returns how many were saved.
    pub fn save_form_templates(&self, templates: &[FormTemplate]) -> Result<usize> {
        self.templates.save_all(templates, Resource::LocalFormTemplate)
    }

    pub fn get_form_template_by_uuid(&self, uuid: &str) -> Result<Option<FormTemplate>> {
        self.templates.get_by_uuid(uuid)
    }

    pub fn get_all_form_templates(&self) -> Result<Vec<FormTemplate>> {
        self.templates.get_all()
    }

    pub fn delete_form_template(&self, template: &FormTemplate) -> Result<()> {
        self.templates.delete(template, Resource::LocalFormTemplate)
    }

    // Form data

    pub fn save_form_data(&self, data: &FormData) -> Result<()> {
        self.data.save(data, Resource::LocalFormData)
    }

    /// Save many form data records in one write. Returns how many were saved.
    pub fn save_all_form_data(&self, data: &[FormData]) -> Result<usize> {
        self.data.save_all(data, Resource::LocalFormData)
    }

    pub fn get_form_data_by_uuid(&self, uuid: &str) -> Result<Option<FormData>> {
        self.data.get_by_uuid(uuid)
    }

    /// All form data with this status; an empty status returns everything.
    pub fn get_all_form_data(&self, status: &str) -> Result<Vec<FormData>> {
        self.data.get_all_filtered("", "", status)
    }

    pub fn get_form_data_by_user(&self, user_uuid: &str, status: &str) -> Result<Vec<FormData>> {
        self.data.get_all_filtered("", user_uuid, status)
    }

    pub fn get_form_data_by_patient(
        &self,
        patient_uuid: &str,
        status: &str,
    ) -> Result<Vec<FormData>> {
        self.data.get_all_filtered(patient_uuid, "", status)
    }

    pub fn delete_form_data(&self, data: &FormData) -> Result<()> {
        self.data.delete(data, Resource::LocalFormData)
    }

    // Index

    /// Raw payloads of one entity kind matching a query.
    pub fn search(&self, kind: &str, query: &str) -> Result<Vec<Value>> {
        let query = Query::parse(query)?;
        Ok(self.index.search(kind, &query)?)
    }
}
