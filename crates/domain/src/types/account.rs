//! Accounts: companies the CRM tracks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::{Contact, Deal};

/// A stored account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
    pub assigned_to: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account with its contacts and deals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountDetail {
    #[serde(flatten)]
    pub account: Account,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub deals: Vec<Deal>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInput {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
    pub assigned_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
    pub assigned_to: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountPatch {
    #[serde(with = "::serde_with::rust::double_option")]
    pub name: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub industry: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub website: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub phone: Option<Option<String>>,
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
}
