use keystone_domain::{Account, Contact, ContactDetail, ContactPatch, Deal, Email, NewContact};
use rusqlite::{Connection, Row};

use super::SqlRecord;
use crate::database::sql::{fetch_children, fetch_related, string_list, timestamp, Columns};

impl SqlRecord for Contact {
    const TABLE: &'static str = "contacts";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Contact {
            id: row.get("id")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            email: row.get("email")?,
            phone: row.get("phone")?,
            company: row.get("company")?,
            position: row.get("position")?,
            address: row.get("address")?,
            city: row.get("city")?,
            state: row.get("state")?,
            zip_code: row.get("zip_code")?,
            country: row.get("country")?,
            notes: row.get("notes")?,
            assigned_to: row.get("assigned_to")?,
            account_id: row.get("account_id")?,
            tags: string_list(row, "tags")?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }

    fn insert_columns(new: NewContact) -> Columns {
        Columns::new()
            .set("first_name", new.first_name)
            .set("last_name", new.last_name)
            .set("email", new.email)
            .set("phone", new.phone)
            .set("company", new.company)
            .set("position", new.position)
            .set("address", new.address)
            .set("city", new.city)
            .set("state", new.state)
            .set("zip_code", new.zip_code)
            .set("country", new.country)
            .set("notes", new.notes)
            .set("assigned_to", new.assigned_to)
            .set("account_id", new.account_id)
            .set("tags", new.tags)
    }

    fn patch_columns(patch: ContactPatch) -> Columns {
        Columns::new()
            .patch("first_name", patch.first_name)
            .patch("last_name", patch.last_name)
            .patch("email", patch.email)
            .patch("phone", patch.phone)
            .patch("company", patch.company)
            .patch("position", patch.position)
            .patch("address", patch.address)
            .patch("city", patch.city)
            .patch("state", patch.state)
            .patch("zip_code", patch.zip_code)
            .patch("country", patch.country)
            .patch("notes", patch.notes)
            .patch("assigned_to", patch.assigned_to)
            .patch("account_id", patch.account_id)
            .patch("tags", patch.tags)
    }

    fn expand(conn: &Connection, contact: Self) -> rusqlite::Result<ContactDetail> {
        let account = fetch_related::<Account>(conn, contact.account_id.as_deref())?;
        let deals = fetch_children::<Deal>(conn, "contact_id", &contact.id)?;
        let emails = fetch_children::<Email>(conn, "contact_id", &contact.id)?;
        Ok(ContactDetail { contact, account, deals, emails })
    }
}
