use keystone_domain::{Account, Contact, Deal, DealDetail, DealPatch, NewDeal};
use rusqlite::{Connection, Row};

use super::SqlRecord;
use crate::database::sql::{fetch_related, opt_timestamp, timestamp, Columns};

impl SqlRecord for Deal {
    const TABLE: &'static str = "deals";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Deal {
            id: row.get("id")?,
            title: row.get("title")?,
            amount: row.get("amount")?,
            stage: row.get("stage")?,
            probability: row.get("probability")?,
            close_date: opt_timestamp(row, "close_date")?,
            description: row.get("description")?,
            assigned_to: row.get("assigned_to")?,
            contact_id: row.get("contact_id")?,
            account_id: row.get("account_id")?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }

    fn insert_columns(new: NewDeal) -> Columns {
        Columns::new()
            .set("title", new.title)
            .set("amount", new.amount)
            .set("stage", new.stage)
            .set("probability", new.probability)
            .set("close_date", new.close_date)
            .set("description", new.description)
            .set("assigned_to", new.assigned_to)
            .set("contact_id", new.contact_id)
            .set("account_id", new.account_id)
    }

    fn patch_columns(patch: DealPatch) -> Columns {
        Columns::new()
            .patch("title", patch.title)
            .patch("amount", patch.amount)
            .patch("stage", patch.stage)
            .patch("probability", patch.probability)
            .patch("close_date", patch.close_date)
            .patch("description", patch.description)
            .patch("assigned_to", patch.assigned_to)
            .patch("contact_id", patch.contact_id)
            .patch("account_id", patch.account_id)
    }

    fn expand(conn: &Connection, deal: Self) -> rusqlite::Result<DealDetail> {
        let contact = fetch_related::<Contact>(conn, deal.contact_id.as_deref())?;
        let account = fetch_related::<Account>(conn, deal.account_id.as_deref())?;
        Ok(DealDetail { deal, contact, account })
    }
}
