//! Project tasks: board items inside a project

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::Project;
use crate::dates;

/// A stored project task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTask {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub assigned_to: Option<String>,
    pub project_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Project task with its project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTaskDetail {
    #[serde(flatten)]
    pub task: ProjectTask,
    pub project: Option<Project>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTaskInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    #[serde(default, with = "dates::option")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, with = "dates::option")]
    pub completed_at: Option<DateTime<Utc>>,
    pub assigned_to: Option<String>,
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProjectTask {
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub assigned_to: Option<String>,
    pub project_id: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectTaskPatch {
    #[serde(with = "::serde_with::rust::double_option")]
    pub title: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub status: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub priority: Option<Option<String>>,
    #[serde(with = "dates::double_option")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(with = "dates::double_option")]
    pub completed_at: Option<Option<DateTime<Utc>>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub assigned_to: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub project_id: Option<Option<String>>,
}
