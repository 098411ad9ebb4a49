use keystone_domain::{Lead, LeadPatch, NewLead};
use rusqlite::{Connection, Row};

use super::SqlRecord;
use crate::database::sql::{string_list, timestamp, Columns};

impl SqlRecord for Lead {
    const TABLE: &'static str = "leads";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Lead {
            id: row.get("id")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            email: row.get("email")?,
            phone: row.get("phone")?,
            company: row.get("company")?,
            position: row.get("position")?,
            source: row.get("source")?,
            status: row.get("status")?,
            notes: row.get("notes")?,
            assigned_to: row.get("assigned_to")?,
            priority: row.get("priority")?,
            tags: string_list(row, "tags")?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }

    fn insert_columns(new: NewLead) -> Columns {
        Columns::new()
            .set("first_name", new.first_name)
            .set("last_name", new.last_name)
            .set("email", new.email)
            .set("phone", new.phone)
            .set("company", new.company)
            .set("position", new.position)
            .set("source", new.source)
            .set("status", new.status)
            .set("notes", new.notes)
            .set("assigned_to", new.assigned_to)
            .set("priority", new.priority)
            .set("tags", new.tags)
    }

    fn patch_columns(patch: LeadPatch) -> Columns {
        Columns::new()
            .patch("first_name", patch.first_name)
            .patch("last_name", patch.last_name)
            .patch("email", patch.email)
            .patch("phone", patch.phone)
            .patch("company", patch.company)
            .patch("position", patch.position)
            .patch("source", patch.source)
            .patch("status", patch.status)
            .patch("notes", patch.notes)
            .patch("assigned_to", patch.assigned_to)
            .patch("priority", patch.priority)
            .patch("tags", patch.tags)
    }

    fn expand(_conn: &Connection, record: Self) -> rusqlite::Result<Lead> {
        Ok(record)
    }
}
