use keystone_domain::{Deal, NewTask, Task, TaskDetail, TaskPatch};
use rusqlite::{Connection, Row};

use super::SqlRecord;
use crate::database::sql::{fetch_related, opt_timestamp, timestamp, Columns};

impl SqlRecord for Task {
    const TABLE: &'static str = "tasks";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Task {
            id: row.get("id")?,
            title: row.get("title")?,
            description: row.get("description")?,
            status: row.get("status")?,
            priority: row.get("priority")?,
            due_date: opt_timestamp(row, "due_date")?,
            completed_at: opt_timestamp(row, "completed_at")?,
            assigned_to: row.get("assigned_to")?,
            deal_id: row.get("deal_id")?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }

    fn insert_columns(new: NewTask) -> Columns {
        Columns::new()
            .set("title", new.title)
            .set("description", new.description)
            .set("status", new.status)
            .set("priority", new.priority)
            .set("due_date", new.due_date)
            .set("completed_at", new.completed_at)
            .set("assigned_to", new.assigned_to)
            .set("deal_id", new.deal_id)
    }

    fn patch_columns(patch: TaskPatch) -> Columns {
        Columns::new()
            .patch("title", patch.title)
            .patch("description", patch.description)
            .patch("status", patch.status)
            .patch("priority", patch.priority)
            .patch("due_date", patch.due_date)
            .patch("completed_at", patch.completed_at)
            .patch("assigned_to", patch.assigned_to)
            .patch("deal_id", patch.deal_id)
    }

    fn expand(conn: &Connection, task: Self) -> rusqlite::Result<TaskDetail> {
        let deal = fetch_related::<Deal>(conn, task.deal_id.as_deref())?;
        Ok(TaskDetail { task, deal })
    }
}
