//! Emails: messages logged against contacts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::Contact;
use crate::dates;

/// A stored email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    pub id: String,
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub status: String,
    pub sent_at: Option<DateTime<Utc>>,
    pub assigned_to: Option<String>,
    pub contact_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Email with its contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailDetail {
    #[serde(flatten)]
    pub email: Email,
    pub contact: Option<Contact>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailInput {
    pub subject: Option<String>,
    pub body: Option<String>,
    pub from: Option<String>,
    pub to: Option<Vec<String>>,
    pub cc: Option<Vec<String>>,
    pub bcc: Option<Vec<String>>,
    pub status: Option<String>,
    #[serde(default, with = "dates::option")]
    pub sent_at: Option<DateTime<Utc>>,
    pub assigned_to: Option<String>,
    pub contact_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEmail {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub status: String,
    pub sent_at: Option<DateTime<Utc>>,
    pub assigned_to: Option<String>,
    pub contact_id: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailPatch {
    #[serde(with = "::serde_with::rust::double_option")]
    pub subject: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub body: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub from: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub to: Option<Option<Vec<String>>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub cc: Option<Option<Vec<String>>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub bcc: Option<Option<Vec<String>>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub status: Option<Option<String>>,
    #[serde(with = "dates::double_option")]
    pub sent_at: Option<Option<DateTime<Utc>>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub assigned_to: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub contact_id: Option<Option<String>>,
}
