//! Integration tests for the storage module
//!
//! End-to-end pool workflows against a real SQLite file: pragmas on every
//! pooled connection, foreign key enforcement, transactions, error mapping.

#![cfg(feature = "platform")]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use keystone_common::error::ErrorClassification;
use keystone_common::storage::{SqlitePool, SqlitePoolConfig, StorageError};
use tempfile::TempDir;

fn test_pool(path: &Path) -> SqlitePool {
    SqlitePool::new(path, SqlitePoolConfig::default()).unwrap()
}

/// Every pooled connection enforces foreign keys
#[test]
fn test_foreign_keys_enforced_on_every_connection() {
    let temp_dir = TempDir::new().unwrap();
    let pool = test_pool(&temp_dir.path().join("fk.db"));

    pool.get_connection()
        .unwrap()
        .execute_batch(
            "CREATE TABLE parent (id TEXT PRIMARY KEY);
             CREATE TABLE child (id TEXT PRIMARY KEY,
                parent_id TEXT REFERENCES parent(id) ON DELETE SET NULL);",
        )
        .unwrap();

    let conn = pool.get_connection().unwrap();

    let err = conn
        .execute("INSERT INTO child (id, parent_id) VALUES ('c1', 'missing')", &[])
        .unwrap_err();
    let code = err.as_rusqlite().and_then(rusqlite::Error::sqlite_error_code);
    assert_eq!(code, Some(rusqlite::ErrorCode::ConstraintViolation));
    assert!(!err.is_retryable());
}

/// Deleting a parent nulls out child references
#[test]
fn test_on_delete_set_null() {
    let temp_dir = TempDir::new().unwrap();
    let pool = test_pool(&temp_dir.path().join("fk.db"));
    let conn = pool.get_connection().unwrap();

    conn.execute_batch(
        "CREATE TABLE parent (id TEXT PRIMARY KEY);
         CREATE TABLE child (id TEXT PRIMARY KEY,
            parent_id TEXT REFERENCES parent(id) ON DELETE SET NULL);
         INSERT INTO parent (id) VALUES ('p1');
         INSERT INTO child (id, parent_id) VALUES ('c1', 'p1');
         DELETE FROM parent WHERE id = 'p1';",
    )
    .unwrap();

    let parent: Option<String> = conn
        .query_row("SELECT parent_id FROM child WHERE id = 'c1'", &[], |row| row.get(0))
        .unwrap();
    assert_eq!(parent, None);
}

/// Committed transactions are visible from other connections
#[test]
fn test_transaction_commit_visible_across_pool() {
    let temp_dir = TempDir::new().unwrap();
    let pool = Arc::new(test_pool(&temp_dir.path().join("tx.db")));

    {
        let mut conn = pool.get_connection().unwrap();
        conn.execute("CREATE TABLE items (name TEXT)", &[]).unwrap();
        let tx = conn.transaction().unwrap();
        tx.execute("INSERT INTO items (name) VALUES ('a')", []).unwrap();
        tx.execute("INSERT INTO items (name) VALUES ('b')", []).unwrap();
        tx.commit().unwrap();
    }

    let reader = Arc::clone(&pool);
    let count = std::thread::spawn(move || {
        reader
            .get_connection()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM items", &[], |row| row.get::<_, i64>(0))
            .unwrap()
    })
    .join()
    .unwrap();
    assert_eq!(count, 2);
}

/// An exhausted pool times out instead of blocking forever
#[test]
fn test_pool_exhaustion_times_out() {
    let temp_dir = TempDir::new().unwrap();
    let config = SqlitePoolConfig::default()
        .with_max_size(1)
        .with_connection_timeout(Duration::from_millis(200));
    let pool = SqlitePool::new(&temp_dir.path().join("busy.db"), config).unwrap();

    let _held = pool.get_connection().unwrap();
    let Err(err) = pool.get_connection() else {
        panic!("second checkout should time out");
    };

    assert!(matches!(err, StorageError::Timeout(_) | StorageError::Connection(_)));
    assert!(err.is_retryable());
}

/// SQL errors surface as storage errors with the query context
#[test]
fn test_bad_sql_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let pool = test_pool(&temp_dir.path().join("bad.db"));
    let conn = pool.get_connection().unwrap();

    let err = conn.prepare("SELECT * FROM does_not_exist").err().unwrap();
    assert!(err.to_string().contains("does_not_exist"));
    assert!(pool.health_check().healthy);
}
