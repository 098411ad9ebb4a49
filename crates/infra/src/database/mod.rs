//! SQLite persistence for CRM records.

pub mod manager;
mod records;
pub mod sql;
pub mod store;

pub use manager::DbManager;
pub use records::SqlRecord;
pub use store::SqliteStore;
