//! Tasks: follow-ups attached to deals

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::Deal;
use crate::dates;

/// A stored task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub assigned_to: Option<String>,
    pub deal_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Task with its deal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDetail {
    #[serde(flatten)]
    pub task: Task,
    pub deal: Option<Deal>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    #[serde(default, with = "dates::option")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, with = "dates::option")]
    pub completed_at: Option<DateTime<Utc>>,
    pub assigned_to: Option<String>,
    pub deal_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub assigned_to: Option<String>,
    pub deal_id: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPatch {
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
    pub deal_id: Option<Option<String>>,
}
