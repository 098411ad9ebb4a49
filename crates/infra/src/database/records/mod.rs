//! Row mapping and relation expansion for each record type.

mod account;
mod contact;
mod deal;
mod email;
mod lead;
mod project;
mod project_task;
mod task;

use keystone_core::Record;
use rusqlite::{Connection, Row};

use super::sql::Columns;

/// A [`Record`] stored in one SQLite table.
pub trait SqlRecord: Record {
    const TABLE: &'static str;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Columns written on insert. `id` and the timestamps are added by the store.
    fn insert_columns(new: Self::New) -> Columns;

    /// Columns touched by a patch; absent fields are left out.
    fn patch_columns(patch: Self::Patch) -> Columns;

    /// Load the relations the API returns alongside the record.
    fn expand(conn: &Connection, record: Self) -> rusqlite::Result<Self::View>;
}
