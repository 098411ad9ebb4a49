//! Pool configuration

use std::time::Duration;

use super::error::{StorageError, StorageResult};

/// Upper bound on pooled connections.
pub const MAX_POOL_SIZE: u32 = 100;

/// SQLite connection pool configuration
#[derive(Debug, Clone)]
pub struct SqlitePoolConfig {
    /// Maximum number of pooled connections (default: 10)
    pub max_size: u32,

    /// How long to wait for a free connection (default: 5s)
    pub connection_timeout: Duration,

    /// SQLite busy timeout applied to each connection (default: 5000ms)
    pub busy_timeout: Duration,

    /// Enable WAL journal mode (default: true)
    pub enable_wal: bool,

    /// Enforce foreign key constraints (default: true)
    pub enable_foreign_keys: bool,
}

impl Default for SqlitePoolConfig {
    fn default() -> Self {
        Self {
            max_size: 10,
            connection_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_millis(5000),
            enable_wal: true,
            enable_foreign_keys: true,
        }
    }
}

impl SqlitePoolConfig {
    /// Set the maximum pool size
    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the connection acquisition timeout
    #[must_use]
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Set the SQLite busy timeout
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Toggle WAL journal mode
    #[must_use]
    pub fn with_wal(mut self, enabled: bool) -> Self {
        self.enable_wal = enabled;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    /// Returns [`StorageError::InvalidConfig`] when a value is out of range.
    pub fn validate(&self) -> StorageResult<()> {
        if self.max_size == 0 {
            return Err(StorageError::InvalidConfig("max_size must be greater than 0".into()));
        }
        if self.max_size > MAX_POOL_SIZE {
            return Err(StorageError::InvalidConfig(format!(
                "max_size too large (max: {MAX_POOL_SIZE})"
            )));
        }
        if self.connection_timeout.is_zero() {
            return Err(StorageError::InvalidConfig(
                "connection_timeout must be greater than 0".into(),
            ));
        }
        if self.busy_timeout.is_zero() {
            return Err(StorageError::InvalidConfig("busy_timeout must be greater than 0".into()));
        }
        Ok(())
    }
}
