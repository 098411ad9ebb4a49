//! Generic SQLite-backed [`EntityStore`].

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use keystone_common::storage::CASEFOLD_FN;
use keystone_core::{EntityStore, ListFilter};
use keystone_domain::{CrmError, Result};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use tokio::task;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::manager::DbManager;
use super::records::SqlRecord;
use super::sql::{column_for, fetch_one, quote, IntoSqlValue};
use crate::errors::InfraError;

/// Store for one record type, one table.
pub struct SqliteStore<R> {
    db: Arc<DbManager>,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for SqliteStore<R> {
    fn clone(&self) -> Self {
        Self { db: Arc::clone(&self.db), _record: PhantomData }
    }
}

impl<R: SqlRecord> SqliteStore<R> {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db, _record: PhantomData }
    }

    async fn with_connection<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> std::result::Result<T, InfraError> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        let outcome = task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            op(&conn)
        })
        .await
        .map_err(InfraError::from)?;
        Ok(outcome?)
    }
}

#[async_trait]
impl<R: SqlRecord> EntityStore<R> for SqliteStore<R> {
    #[instrument(skip(self, filter), fields(table = R::TABLE))]
    async fn list(&self, filter: &ListFilter) -> Result<Vec<R::View>> {
        let (sql, params) = select_sql(R::TABLE, filter);
        self.with_connection(move |conn| {
            debug!(sql = %sql, "listing records");
            let mut stmt = conn.prepare(&sql)?;
            let records = stmt
                .query_map(params_from_iter(params.iter()), R::from_row)?
                .collect::<rusqlite::Result<Vec<R>>>()?;
            let views = records
                .into_iter()
                .map(|record| R::expand(conn, record))
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(views)
        })
        .await
    }

    #[instrument(skip(self), fields(table = R::TABLE))]
    async fn find(&self, id: &str) -> Result<Option<R::View>> {
        let id = id.to_string();
        self.with_connection(move |conn| {
            let view = fetch_one::<R>(conn, &id)?.map(|record| R::expand(conn, record)).transpose()?;
            Ok(view)
        })
        .await
    }

    #[instrument(skip(self, new), fields(table = R::TABLE))]
    async fn create(&self, new: R::New) -> Result<R::View> {
        let id = Uuid::now_v7().to_string();
        let now = Utc::now().into_sql_value();
        let columns = R::insert_columns(new);

        self.with_connection(move |conn| {
            let names: Vec<String> = ["id", "created_at", "updated_at"]
                .into_iter()
                .chain(columns.names())
                .map(quote)
                .collect();
            let placeholders = vec!["?"; names.len()].join(", ");
            let sql = format!(
                "INSERT INTO {} ({}) VALUES ({placeholders})",
                R::TABLE,
                names.join(", ")
            );

            let mut values = vec![Value::Text(id.clone()), now.clone(), now];
            values.extend(columns.into_values());

            let tx = conn.unchecked_transaction()?;
            tx.execute(&sql, params_from_iter(values.iter()))?;
            let record = fetch_one::<R>(&tx, &id)?.ok_or_else(|| {
                CrmError::Internal(format!("{} {id} missing after insert", R::TABLE))
            })?;
            let view = R::expand(&tx, record)?;
            tx.commit()?;
            Ok(view)
        })
        .await
    }

    #[instrument(skip(self, patch), fields(table = R::TABLE))]
    async fn update(&self, id: &str, patch: R::Patch) -> Result<Option<R::View>> {
        let id = id.to_string();
        let columns = R::patch_columns(patch);
        let now = Utc::now().into_sql_value();

        self.with_connection(move |conn| {
            let assignments: Vec<String> = columns
                .names()
                .chain(std::iter::once("updated_at"))
                .map(|name| format!("{} = ?", quote(name)))
                .collect();
            let sql = format!("UPDATE {} SET {} WHERE id = ?", R::TABLE, assignments.join(", "));

            let mut values = columns.into_values();
            values.push(now);
            values.push(Value::Text(id.clone()));

            let tx = conn.unchecked_transaction()?;
            let changed = tx.execute(&sql, params_from_iter(values.iter()))?;
            if changed == 0 {
                return Ok(None);
            }
            let view =
                fetch_one::<R>(&tx, &id)?.map(|record| R::expand(&tx, record)).transpose()?;
            tx.commit()?;
            Ok(view)
        })
        .await
    }

    #[instrument(skip(self), fields(table = R::TABLE))]
    async fn delete(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        self.with_connection(move |conn| {
            let sql = format!("DELETE FROM {} WHERE id = ?1", R::TABLE);
            let removed = conn.execute(&sql, [&id])?;
            Ok(removed > 0)
        })
        .await
    }

    #[instrument(skip(self), fields(table = R::TABLE))]
    async fn count(&self) -> Result<i64> {
        self.with_connection(|conn| {
            let sql = format!("SELECT COUNT(*) FROM {}", R::TABLE);
            let total = conn.query_row(&sql, [], |row| row.get(0))?;
            Ok(total)
        })
        .await
    }
}

/// Build the list query: search terms OR'd across the search fields with
/// Unicode case folding, exact filters AND'ed, newest first.
fn select_sql(table: &str, filter: &ListFilter) -> (String, Vec<Value>) {
    let mut clauses = Vec::new();
    let mut params = Vec::new();

    if let Some(term) = filter.search() {
        let any_field: Vec<String> = filter
            .search_fields()
            .iter()
            .map(|field| {
                format!(
                    "instr({CASEFOLD_FN}({}), {CASEFOLD_FN}(?)) > 0",
                    quote(&column_for(field))
                )
            })
            .collect();
        params.extend(std::iter::repeat(Value::Text(term.to_string())).take(any_field.len()));
        clauses.push(format!("({})", any_field.join(" OR ")));
    }

    for (field, value) in filter.exact() {
        clauses.push(format!("{} = ?", quote(&column_for(field))));
        params.push(Value::Text(value.clone()));
    }

    let mut sql = format!("SELECT * FROM {table}");
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY created_at DESC, rowid DESC");
    (sql, params)
}

#[cfg(test)]
mod tests {
    use keystone_domain::EntityKind;

    use super::*;

    #[test]
    fn unconstrained_filter_selects_everything_newest_first() {
        let (sql, params) = select_sql("leads", &ListFilter::new(EntityKind::Lead));
        assert_eq!(sql, "SELECT * FROM leads ORDER BY created_at DESC, rowid DESC");
        assert!(params.is_empty());
    }

    #[test]
    fn search_and_filters_are_combined() {
        let filter = ListFilter::new(EntityKind::Lead).with_search("acme").with_filter("status", "New");
        let (sql, params) = select_sql("leads", &filter);

        assert!(sql.contains("instr(casefold(\"first_name\"), casefold(?)) > 0 OR"));
        assert!(sql.contains("instr(casefold(\"company\"), casefold(?)) > 0)"));
        assert!(sql.contains(" AND \"status\" = ?"));
        assert_eq!(params.len(), 5);
        assert_eq!(params[4], Value::Text("New".to_string()));
    }

    #[test]
    fn email_search_quotes_keyword_columns() {
        let filter = ListFilter::new(EntityKind::Email).with_search("invoice");
        let (sql, _) = select_sql("emails", &filter);
        assert!(sql.contains("casefold(\"from\")"));
    }
}
