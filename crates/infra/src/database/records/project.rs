use keystone_domain::{NewProject, Project, ProjectDetail, ProjectPatch, ProjectTask};
use rusqlite::{Connection, Row};

use super::SqlRecord;
use crate::database::sql::{fetch_children, opt_timestamp, timestamp, Columns};

impl SqlRecord for Project {
    const TABLE: &'static str = "projects";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Project {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            status: row.get("status")?,
            start_date: opt_timestamp(row, "start_date")?,
            end_date: opt_timestamp(row, "end_date")?,
            progress: row.get("progress")?,
            assigned_to: row.get("assigned_to")?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }

    fn insert_columns(new: NewProject) -> Columns {
        Columns::new()
            .set("name", new.name)
            .set("description", new.description)
            .set("status", new.status)
            .set("start_date", new.start_date)
            .set("end_date", new.end_date)
            .set("progress", new.progress)
            .set("assigned_to", new.assigned_to)
    }

    fn patch_columns(patch: ProjectPatch) -> Columns {
        Columns::new()
            .patch("name", patch.name)
            .patch("description", patch.description)
            .patch("status", patch.status)
            .patch("start_date", patch.start_date)
            .patch("end_date", patch.end_date)
            .patch("progress", patch.progress)
            .patch("assigned_to", patch.assigned_to)
    }

    fn expand(conn: &Connection, project: Self) -> rusqlite::Result<ProjectDetail> {
        let tasks = fetch_children::<ProjectTask>(conn, "project_id", &project.id)?;
        Ok(ProjectDetail { project, tasks })
    }
}
