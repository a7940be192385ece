//! Typed data access over the local index and the REST client.
//!
//! Responsibilities:
//! - Download remote entities into the partition of a [`Resource`].
//! - Save, look up and delete entities of one kind.
//!
//! Does NOT handle:
//! - Choosing which resource an operation targets (see [`crate::service`]).
//!
//! Invariants:
//! - A DAO only writes to resources whose kind matches `T::KIND`.

mod form;
mod form_data;

use std::marker::PhantomData;
use std::sync::Arc;

use muzima_client::{Form, FormData, FormTemplate, OpenmrsClient, OpenmrsSearchable};
use serde_json::Value;
use tracing::info;

use crate::error::{Error, Result};
use crate::index::{LocalIndex, Query, StoreError};
use crate::resource::Resource;

/// Data access for one [`OpenmrsSearchable`] kind.
#[derive(Debug)]
pub struct SearchableDao<T> {
    index: Arc<LocalIndex>,
    client: Arc<OpenmrsClient>,
    _kind: PhantomData<fn() -> T>,
}

pub type FormDao = SearchableDao<Form>;
pub type FormTemplateDao = SearchableDao<FormTemplate>;
pub type FormDataDao = SearchableDao<FormData>;

impl<T: OpenmrsSearchable> SearchableDao<T> {
    pub fn new(index: Arc<LocalIndex>, client: Arc<OpenmrsClient>) -> Self {
        Self {
            index,
            client,
            _kind: PhantomData,
        }
    }

    /// Fetch from the resource's remote endpoint and store the results in
    /// its partition. Returns the number of entities stored.
    pub async fn download(&self, search: &str, resource: Resource) -> Result<usize> {
        self.check_kind(resource)?;
        let resolver = resource
            .resolver()
            .ok_or(Error::UnknownResource(resource))?;

        let entities: Vec<T> = self.client.download(resolver, search).await?;
        let count = self.store(&entities, resource)?;

        info!(resource = %resource, search, count, "Downloaded {}", T::KIND);
        Ok(count)
    }

    pub fn save(&self, entity: &T, resource: Resource) -> Result<()> {
        self.check_kind(resource)?;
        self.index
            .put(resource.partition(), T::KIND, entity.uuid(), to_payload(entity)?)?;
        Ok(())
    }

    /// Save a batch of entities with a single partition write.
    pub fn save_all(&self, entities: &[T], resource: Resource) -> Result<usize> {
        self.check_kind(resource)?;
        self.store(entities, resource)
    }

    pub fn get_by_uuid(&self, uuid: &str) -> Result<Option<T>> {
        self.index
            .get(T::KIND, uuid)?
            .map(|payload| from_payload(uuid, payload))
            .transpose()
    }

    pub fn get_all(&self) -> Result<Vec<T>> {
        self.search(&Query::all())
    }

    /// Entities matching a query in the index query language.
    pub fn query(&self, query: &str) -> Result<Vec<T>> {
        self.search(&Query::parse(query)?)
    }

    pub fn delete(&self, entity: &T, resource: Resource) -> Result<()> {
        self.check_kind(resource)?;
        self.index
            .remove(resource.partition(), T::KIND, entity.uuid())?;
        Ok(())
    }

    fn store(&self, entities: &[T], resource: Resource) -> Result<usize> {
        let documents = entities
            .iter()
            .map(|entity| Ok((entity.uuid().to_string(), to_payload(entity)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(self
            .index
            .put_all(resource.partition(), T::KIND, documents)?)
    }

    fn search(&self, query: &Query) -> Result<Vec<T>> {
        self.index
            .search(T::KIND, query)?
            .into_iter()
            .map(|payload| {
                let uuid = payload
                    .get("uuid")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                from_payload(&uuid, payload)
            })
            .collect()
    }

    fn check_kind(&self, resource: Resource) -> Result<()> {
        if resource.kind() != T::KIND {
            return Err(Error::KindMismatch {
                resource,
                kind: T::KIND,
            });
        }
        Ok(())
    }
}

fn to_payload<T: OpenmrsSearchable>(entity: &T) -> Result<Value> {
    Ok(serde_json::to_value(entity).map_err(StoreError::Serialize)?)
}

fn from_payload<T: OpenmrsSearchable>(uuid: &str, payload: Value) -> Result<T> {
    Ok(
        serde_json::from_value(payload).map_err(|source| StoreError::Decode {
            uuid: uuid.to_string(),
            kind: T::KIND.to_string(),
            source,
        })?,
    )
}
