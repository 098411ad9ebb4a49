//! SQLite connection pool

use std::path::{Path, PathBuf};
use std::time::Instant;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::connection::SqliteConnection;
use super::functions::register_functions;
use super::pragmas::apply_connection_pragmas;
use crate::storage::config::SqlitePoolConfig;
use crate::storage::error::{StorageError, StorageResult};

/// Snapshot of pool health
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub healthy: bool,
    pub connections: usize,
    pub idle_connections: usize,
    pub max_connections: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthStatus {
    fn healthy(connections: usize, idle_connections: usize, max_connections: usize) -> Self {
        Self { healthy: true, connections, idle_connections, max_connections, message: None }
    }

    fn unhealthy(message: String, max_connections: usize) -> Self {
        Self {
            healthy: false,
            connections: 0,
            idle_connections: 0,
            max_connections,
            message: Some(message),
        }
    }
}

/// r2d2 pool of SQLite connections with pragmas applied on open.
#[derive(Debug)]
pub struct SqlitePool {
    pool: Pool<SqliteConnectionManager>,
    config: SqlitePoolConfig,
    path: PathBuf,
}

impl SqlitePool {
    /// Open (creating if needed) the database at `path` and build the pool.
    ///
    /// A test connection is acquired before returning so an unusable path
    /// fails here rather than on first query.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid, the parent directory
    /// cannot be created or SQLite cannot open the file.
    #[instrument(fields(db_path = ?path, pool_size = config.max_size))]
    pub fn new(path: &Path, config: SqlitePoolConfig) -> StorageResult<Self> {
        config.validate()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let pragma_config = config.clone();
        let manager = SqliteConnectionManager::file(path).with_init(move |conn| {
            apply_connection_pragmas(conn, &pragma_config)
                .and_then(|()| register_functions(conn))
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
        });

        let pool = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .map_err(|e| {
                warn!(error = %e, "failed to create connection pool");
                StorageError::Connection(format!("Failed to create pool: {e}"))
            })?;

        drop(pool.get().map_err(|e| {
            StorageError::Connection(format!("Failed to get test connection: {e}"))
        })?);

        info!(max_size = config.max_size, "SQLite pool created");
        Ok(Self { pool, config, path: path.to_path_buf() })
    }

    /// Check out a connection
    #[instrument(skip(self), fields(pool_size = self.config.max_size))]
    pub fn get_connection(&self) -> StorageResult<SqliteConnection> {
        let start = Instant::now();
        match self.pool.get() {
            Ok(conn) => {
                debug!(elapsed_ms = start.elapsed().as_millis() as u64, "connection acquired");
                Ok(SqliteConnection::new(conn))
            }
            Err(e) => {
                let message = e.to_string();
                if message.to_lowercase().contains("timed out") {
                    warn!(timeout = ?self.config.connection_timeout, "connection timeout");
                    Err(StorageError::Timeout(self.config.connection_timeout.as_secs()))
                } else {
                    warn!(error = %message, "connection error");
                    Err(StorageError::Connection(format!("Failed to get connection: {message}")))
                }
            }
        }
    }

    /// Report pool state, probing with a trivial query.
    pub fn health_check(&self) -> HealthStatus {
        let state = self.pool.state();
        let max = self.config.max_size as usize;
        let probe = self
            .pool
            .get()
            .map_err(|e| e.to_string())
            .and_then(|conn| conn.query_row("SELECT 1", [], |_| Ok(())).map_err(|e| e.to_string()));

        match probe {
            Ok(()) => HealthStatus::healthy(
                state.connections as usize,
                state.idle_connections as usize,
                max,
            ),
            Err(message) => HealthStatus::unhealthy(format!("Pool unhealthy: {message}"), max),
        }
    }

    /// Database file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Configured maximum pool size
    pub fn max_size(&self) -> u32 {
        self.config.max_size
    }
}
