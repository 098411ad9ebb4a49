//! Storage error types

use thiserror::Error;

use crate::error::{ErrorClassification, ErrorSeverity};

/// Storage error type
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(String),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Database pool exhausted")]
    PoolExhausted,

    #[error("Connection timeout after {0}s")]
    Timeout(u64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Rusqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    R2d2(#[from] r2d2::Error),
}

/// Storage result type
pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    /// The underlying SQLite error, when there is one.
    pub fn as_rusqlite(&self) -> Option<&rusqlite::Error> {
        match self {
            Self::Rusqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl ErrorClassification for StorageError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::PoolExhausted | Self::Timeout(_) | Self::Connection(_) => true,
            Self::Rusqlite(err) => matches!(
                err.sqlite_error_code(),
                Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked)
            ),
            _ => false,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Migration(_) => ErrorSeverity::Critical,
            Self::PoolExhausted | Self::Timeout(_) => ErrorSeverity::Warning,
            Self::Connection(_)
            | Self::Query(_)
            | Self::InvalidConfig(_)
            | Self::Io(_)
            | Self::Rusqlite(_)
            | Self::R2d2(_) => ErrorSeverity::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = StorageError::Connection("Failed to connect".to_string());
        assert_eq!(err.to_string(), "Database connection error: Failed to connect");
        assert_eq!(StorageError::Timeout(5).to_string(), "Connection timeout after 5s");
    }

    #[test]
    fn transient_errors_are_retryable() {
        assert!(StorageError::PoolExhausted.is_retryable());
        assert!(StorageError::Timeout(5).is_retryable());
        assert!(!StorageError::InvalidConfig("bad".into()).is_retryable());
        assert!(!StorageError::Rusqlite(rusqlite::Error::QueryReturnedNoRows).is_retryable());
    }

    #[test]
    fn migration_failures_are_critical() {
        assert!(StorageError::Migration("boom".into()).is_critical());
        assert_eq!(StorageError::Timeout(1).severity(), ErrorSeverity::Warning);
        assert_eq!(StorageError::Query("x".into()).severity(), ErrorSeverity::Error);
    }
}
