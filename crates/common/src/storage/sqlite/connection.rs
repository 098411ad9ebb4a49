//! Pooled connection wrapper

use std::ops::{Deref, DerefMut};

use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, Row, Statement, ToSql, Transaction};
use tracing::instrument;

use crate::storage::error::{StorageError, StorageResult};

/// A connection checked out of [`super::SqlitePool`].
///
/// Returned to the pool on drop. Derefs to [`rusqlite::Connection`] for
/// anything the wrapper does not cover.
pub struct SqliteConnection {
    inner: PooledConnection<SqliteConnectionManager>,
}

impl SqliteConnection {
    pub(crate) fn new(conn: PooledConnection<SqliteConnectionManager>) -> Self {
        Self { inner: conn }
    }

    /// Execute a statement and return the number of changed rows
    #[instrument(skip(self, params), fields(sql = %sql))]
    pub fn execute(&self, sql: &str, params: &[&dyn ToSql]) -> StorageResult<usize> {
        self.inner.execute(sql, params).map_err(StorageError::from)
    }

    /// Execute a query that returns a single row
    #[instrument(skip(self, params, f), fields(sql = %sql))]
    pub fn query_row<T, F>(&self, sql: &str, params: &[&dyn ToSql], f: F) -> StorageResult<T>
    where
        F: FnOnce(&Row<'_>) -> Result<T, rusqlite::Error>,
    {
        self.inner.query_row(sql, params, f).map_err(StorageError::from)
    }

    /// Prepare a statement
    #[instrument(skip(self), fields(sql = %sql))]
    pub fn prepare(&self, sql: &str) -> StorageResult<SqliteStatement<'_>> {
        let stmt = self.inner.prepare(sql).map_err(StorageError::from)?;
        Ok(SqliteStatement { inner: stmt })
    }

    /// Begin a transaction
    #[instrument(skip(self))]
    pub fn transaction(&mut self) -> StorageResult<Transaction<'_>> {
        self.inner.transaction().map_err(StorageError::from)
    }
}

impl Deref for SqliteConnection {
    type Target = Connection;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for SqliteConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

/// Prepared statement wrapper
pub struct SqliteStatement<'conn> {
    inner: Statement<'conn>,
}

impl SqliteStatement<'_> {
    /// Execute the statement with parameters
    pub fn execute(&mut self, params: &[&dyn ToSql]) -> StorageResult<usize> {
        self.inner.execute(params).map_err(StorageError::from)
    }

    /// Run the query and collect every mapped row
    pub fn query_map<T, F>(&mut self, params: &[&dyn ToSql], mut f: F) -> StorageResult<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> Result<T, rusqlite::Error>,
    {
        let rows = self.inner.query_map(params, |row| f(row)).map_err(StorageError::from)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(StorageError::from)
    }

    /// Column names of the result set, in order
    pub fn column_names(&self) -> Vec<String> {
        self.inner.column_names().into_iter().map(str::to_string).collect()
    }
}
