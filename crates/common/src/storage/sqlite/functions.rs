//! Application-defined SQL functions

use rusqlite::functions::FunctionFlags;
use rusqlite::types::ValueRef;
use rusqlite::Connection;

use crate::storage::error::{StorageError, StorageResult};

/// Name of the Unicode lowercase function registered on every connection.
///
/// SQLite's built-in `lower()` only folds ASCII letters.
pub const CASEFOLD_FN: &str = "casefold";

/// Register the application SQL functions on `conn`.
pub fn register_functions(conn: &Connection) -> StorageResult<()> {
    conn.create_scalar_function(
        CASEFOLD_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let folded = match ctx.get_raw(0) {
                ValueRef::Text(bytes) => Some(String::from_utf8_lossy(bytes).to_lowercase()),
                _ => None,
            };
            Ok(folded)
        },
    )
    .map_err(|e| StorageError::Query(format!("Failed to register {CASEFOLD_FN}: {e}")))
}
