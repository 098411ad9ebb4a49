use keystone_domain::{Contact, Email, EmailDetail, EmailPatch, NewEmail};
use rusqlite::{Connection, Row};

use super::SqlRecord;
use crate::database::sql::{fetch_related, opt_timestamp, string_list, timestamp, Columns};

impl SqlRecord for Email {
    const TABLE: &'static str = "emails";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Email {
            id: row.get("id")?,
            subject: row.get("subject")?,
            body: row.get("body")?,
            from: row.get("from")?,
            to: string_list(row, "to")?,
            cc: string_list(row, "cc")?,
            bcc: string_list(row, "bcc")?,
            status: row.get("status")?,
            sent_at: opt_timestamp(row, "sent_at")?,
            assigned_to: row.get("assigned_to")?,
            contact_id: row.get("contact_id")?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }

    fn insert_columns(new: NewEmail) -> Columns {
        Columns::new()
            .set("subject", new.subject)
            .set("body", new.body)
            .set("from", new.from)
            .set("to", new.to)
            .set("cc", new.cc)
            .set("bcc", new.bcc)
            .set("status", new.status)
            .set("sent_at", new.sent_at)
            .set("assigned_to", new.assigned_to)
            .set("contact_id", new.contact_id)
    }

    fn patch_columns(patch: EmailPatch) -> Columns {
        Columns::new()
            .patch("subject", patch.subject)
            .patch("body", patch.body)
            .patch("from", patch.from)
            .patch("to", patch.to)
            .patch("cc", patch.cc)
            .patch("bcc", patch.bcc)
            .patch("status", patch.status)
            .patch("sent_at", patch.sent_at)
            .patch("assigned_to", patch.assigned_to)
            .patch("contact_id", patch.contact_id)
    }

    fn expand(conn: &Connection, email: Self) -> rusqlite::Result<EmailDetail> {
        let contact = fetch_related::<Contact>(conn, email.contact_id.as_deref())?;
        Ok(EmailDetail { email, contact })
    }
}
