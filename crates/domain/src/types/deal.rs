//! Deals: sales opportunities moving through stages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::{Account, Contact};
use crate::dates;

/// A stored deal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: String,
    pub title: String,
    pub amount: Option<f64>,
    pub stage: String,
    pub probability: i64,
    pub close_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub contact_id: Option<String>,
    pub account_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Deal with its contact and account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealDetail {
    #[serde(flatten)]
    pub deal: Deal,
    pub contact: Option<Contact>,
    pub account: Option<Account>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealInput {
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub stage: Option<String>,
    pub probability: Option<i64>,
    #[serde(default, with = "dates::option")]
    pub close_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub contact_id: Option<String>,
    pub account_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDeal {
    pub title: String,
    pub amount: Option<f64>,
    pub stage: String,
    pub probability: i64,
    pub close_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub contact_id: Option<String>,
    pub account_id: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DealPatch {
    #[serde(with = "::serde_with::rust::double_option")]
    pub title: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub amount: Option<Option<f64>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub stage: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub probability: Option<Option<i64>>,
    #[serde(with = "dates::double_option")]
    pub close_date: Option<Option<DateTime<Utc>>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub assigned_to: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub contact_id: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub account_id: Option<Option<String>>,
}
