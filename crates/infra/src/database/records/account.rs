use keystone_domain::{Account, AccountDetail, AccountPatch, Contact, Deal, NewAccount};
use rusqlite::{Connection, Row};

use super::SqlRecord;
use crate::database::sql::{fetch_children, timestamp, Columns};

impl SqlRecord for Account {
    const TABLE: &'static str = "accounts";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Account {
            id: row.get("id")?,
            name: row.get("name")?,
            industry: row.get("industry")?,
            website: row.get("website")?,
            phone: row.get("phone")?,
            address: row.get("address")?,
            city: row.get("city")?,
            state: row.get("state")?,
            zip_code: row.get("zip_code")?,
            country: row.get("country")?,
            notes: row.get("notes")?,
            assigned_to: row.get("assigned_to")?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }

    fn insert_columns(new: NewAccount) -> Columns {
        Columns::new()
            .set("name", new.name)
            .set("industry", new.industry)
            .set("website", new.website)
            .set("phone", new.phone)
            .set("address", new.address)
            .set("city", new.city)
            .set("state", new.state)
            .set("zip_code", new.zip_code)
            .set("country", new.country)
            .set("notes", new.notes)
            .set("assigned_to", new.assigned_to)
    }

    fn patch_columns(patch: AccountPatch) -> Columns {
        Columns::new()
            .patch("name", patch.name)
            .patch("industry", patch.industry)
            .patch("website", patch.website)
            .patch("phone", patch.phone)
            .patch("address", patch.address)
            .patch("city", patch.city)
            .patch("state", patch.state)
            .patch("zip_code", patch.zip_code)
            .patch("country", patch.country)
            .patch("notes", patch.notes)
            .patch("assigned_to", patch.assigned_to)
    }

    fn expand(conn: &Connection, account: Self) -> rusqlite::Result<AccountDetail> {
        let contacts = fetch_children::<Contact>(conn, "account_id", &account.id)?;
        let deals = fetch_children::<Deal>(conn, "account_id", &account.id)?;
        Ok(AccountDetail { account, contacts, deals })
    }
}
