//! Entity service - the use cases behind every collection and item endpoint

use std::collections::HashMap;
use std::sync::Arc;

use keystone_domain::{CrmError, EntityKind, Result};
use tracing::{debug, info, warn};

use super::filter::ListFilter;
use super::ports::EntityStore;
use crate::records::{validation_failed, Record};

/// CRUD use cases for one record type
pub struct EntityService<R: Record> {
    store: Arc<dyn EntityStore<R>>,
}

impl<R: Record> Clone for EntityService<R> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store) }
    }
}

impl<R: Record> EntityService<R> {
    /// Create a new service over a store
    pub fn new(store: Arc<dyn EntityStore<R>>) -> Self {
        Self { store }
    }

    pub const fn kind(&self) -> EntityKind {
        R::KIND
    }

    /// Records matching `filter`, newest first
    pub async fn list(&self, filter: &ListFilter) -> Result<Vec<R::View>> {
        let records = self.store.list(filter).await?;
        debug!(
            entity = R::KIND.path_segment(),
            search = filter.search(),
            filters = filter.exact().len(),
            count = records.len(),
            "listed records"
        );
        Ok(records)
    }

    /// Records matching raw query parameters
    pub async fn list_by_params(&self, params: &HashMap<String, String>) -> Result<Vec<R::View>> {
        self.list(&ListFilter::from_params(R::KIND, params)).await
    }

    /// A record by id, or `NotFound` with the entity's message
    pub async fn get(&self, id: &str) -> Result<R::View> {
        self.store.find(id).await?.ok_or_else(|| self.not_found())
    }

    /// Validate, apply defaults and insert
    pub async fn create(&self, input: R::Input) -> Result<R::View> {
        let record = R::prepare(input).map_err(|err| {
            debug!(entity = R::KIND.path_segment(), error = %err, "create rejected");
            validation_failed(err)
        })?;
        let view = self.store.create(record).await?;
        info!(entity = R::KIND.path_segment(), "record created");
        Ok(view)
    }

    /// Validate and apply a partial update; never creates a record
    pub async fn update(&self, id: &str, patch: R::Patch) -> Result<R::View> {
        let patch = R::prepare_patch(patch).map_err(|err| {
            debug!(entity = R::KIND.path_segment(), id, error = %err, "update rejected");
            validation_failed(err)
        })?;
        match self.store.update(id, patch).await? {
            Some(view) => {
                info!(entity = R::KIND.path_segment(), id, "record updated");
                Ok(view)
            }
            None => Err(self.not_found()),
        }
    }

    /// Remove a record by id
    pub async fn delete(&self, id: &str) -> Result<()> {
        if self.store.delete(id).await? {
            info!(entity = R::KIND.path_segment(), id, "record deleted");
            Ok(())
        } else {
            warn!(entity = R::KIND.path_segment(), id, "delete of missing record");
            Err(self.not_found())
        }
    }

    /// Total number of records
    pub async fn count(&self) -> Result<i64> {
        self.store.count().await
    }

    fn not_found(&self) -> CrmError {
        CrmError::NotFound(R::KIND.not_found_message())
    }
}
