//! Projects and their task boards

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::ProjectTask;
use crate::dates;

/// A stored project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub progress: i64,
    pub assigned_to: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Project with its tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    #[serde(default)]
    pub tasks: Vec<ProjectTask>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    #[serde(default, with = "dates::option")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, with = "dates::option")]
    pub end_date: Option<DateTime<Utc>>,
    pub progress: Option<i64>,
    pub assigned_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub progress: i64,
    pub assigned_to: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPatch {
    #[serde(with = "::serde_with::rust::double_option")]
    pub name: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub status: Option<Option<String>>,
    #[serde(with = "dates::double_option")]
    pub start_date: Option<Option<DateTime<Utc>>>,
    #[serde(with = "dates::double_option")]
    pub end_date: Option<Option<DateTime<Utc>>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub progress: Option<Option<i64>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub assigned_to: Option<Option<String>>,
}
