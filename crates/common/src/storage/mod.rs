//! SQLite storage primitives
//!
//! Connection pooling, per-connection pragmas and SQL functions, and the
//! storage error type.
//! Schema management belongs to the application layer; this module only
//! hands out configured connections.

pub mod config;
pub mod error;
pub mod sqlite;

pub use config::SqlitePoolConfig;
pub use error::{StorageError, StorageResult};
pub use sqlite::{
    apply_connection_pragmas, register_functions, HealthStatus, SqliteConnection, SqlitePool, SqliteStatement,
    CASEFOLD_FN,
};
