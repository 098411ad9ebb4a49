//! Contacts: people at accounts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::{Account, Deal, Email};

/// A stored contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
    pub assigned_to: Option<String>,
    pub account_id: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Contact with its account, deals and emails
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactDetail {
    #[serde(flatten)]
    pub contact: Contact,
    pub account: Option<Account>,
    #[serde(default)]
    pub deals: Vec<Deal>,
    #[serde(default)]
    pub emails: Vec<Email>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
    pub assigned_to: Option<String>,
    pub account_id: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
    pub assigned_to: Option<String>,
    pub account_id: Option<String>,
    pub tags: Vec<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactPatch {
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
    pub address: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub city: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub state: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub zip_code: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub country: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub notes: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub assigned_to: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub account_id: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub tags: Option<Option<Vec<String>>>,
}
