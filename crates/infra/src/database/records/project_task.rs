use keystone_domain::{NewProjectTask, Project, ProjectTask, ProjectTaskDetail, ProjectTaskPatch};
use rusqlite::{Connection, Row};

use super::SqlRecord;
use crate::database::sql::{fetch_related, opt_timestamp, timestamp, Columns};

impl SqlRecord for ProjectTask {
    const TABLE: &'static str = "project_tasks";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(ProjectTask {
            id: row.get("id")?,
            title: row.get("title")?,
            description: row.get("description")?,
            status: row.get("status")?,
            priority: row.get("priority")?,
            due_date: opt_timestamp(row, "due_date")?,
            completed_at: opt_timestamp(row, "completed_at")?,
            assigned_to: row.get("assigned_to")?,
            project_id: row.get("project_id")?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }

    fn insert_columns(new: NewProjectTask) -> Columns {
        Columns::new()
            .set("title", new.title)
            .set("description", new.description)
            .set("status", new.status)
            .set("priority", new.priority)
            .set("due_date", new.due_date)
            .set("completed_at", new.completed_at)
            .set("assigned_to", new.assigned_to)
            .set("project_id", new.project_id)
    }

    fn patch_columns(patch: ProjectTaskPatch) -> Columns {
        Columns::new()
            .patch("title", patch.title)
            .patch("description", patch.description)
            .patch("status", patch.status)
            .patch("priority", patch.priority)
            .patch("due_date", patch.due_date)
            .patch("completed_at", patch.completed_at)
            .patch("assigned_to", patch.assigned_to)
            .patch("project_id", patch.project_id)
    }

    fn expand(conn: &Connection, task: Self) -> rusqlite::Result<ProjectTaskDetail> {
        let project = fetch_related::<Project>(conn, task.project_id.as_deref())?;
        Ok(ProjectTaskDetail { task, project })
    }
}
