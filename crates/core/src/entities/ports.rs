//! Storage port for CRM records.

use async_trait::async_trait;
use keystone_domain::Result;

use super::filter::ListFilter;
use crate::records::Record;

/// Persistence for one record type.
///
/// Returned views carry the record's expanded relations. Missing ids are
/// reported as `None` / `false`; the service turns them into not-found
/// errors with the entity's message.
#[async_trait]
pub trait EntityStore<R: Record>: Send + Sync {
    /// Records matching `filter`, newest first.
    async fn list(&self, filter: &ListFilter) -> Result<Vec<R::View>>;

    /// A single record by id.
    async fn find(&self, id: &str) -> Result<Option<R::View>>;

    /// Insert a validated record, assigning id and timestamps.
    async fn create(&self, record: R::New) -> Result<R::View>;

    /// Apply a validated patch. `None` when no record has this id.
    async fn update(&self, id: &str, patch: R::Patch) -> Result<Option<R::View>>;

    /// Remove a record. `false` when no record has this id.
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Total number of records.
    async fn count(&self) -> Result<i64>;
}
