//! Leads: unqualified prospects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// A stored lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub source: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub assigned_to: Option<String>,
    pub priority: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payload as received
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub source: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub assigned_to: Option<String>,
    pub priority: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Validated lead with defaults applied, ready to insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewLead {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub source: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub assigned_to: Option<String>,
    pub priority: String,
    pub tags: Vec<String>,
}

/// Partial update; `Some(None)` clears the field
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadPatch {
    #[serde(with = "::serde_with::rust::double_option")]
    pub first_name: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub last_name: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub email: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub phone: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub company: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub position: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub source: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub status: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub notes: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub assigned_to: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub priority: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub tags: Option<Option<Vec<String>>>,
}
