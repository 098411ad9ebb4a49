//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Keystone
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum CrmError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation failed: {}", join_issues(.0))]
    Validation(Vec<FieldIssue>),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// A single rejected field in a payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues.iter().map(|i| format!("{} {}", i.field, i.message)).collect::<Vec<_>>().join("; ")
}

impl CrmError {
    /// Whether the caller sent something the server can never accept as-is.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::InvalidInput(_) | Self::Validation(_))
    }
}

/// Result type alias for Keystone operations
pub type Result<T> = std::result::Result<T, CrmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_lists_fields() {
        let err = CrmError::Validation(vec![
            FieldIssue::new("firstName", "is required"),
            FieldIssue::new("email", "is not a valid email address"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: firstName is required; email is not a valid email address"
        );
        assert!(err.is_client_error());
    }

    #[test]
    fn serializes_tagged() {
        let json = serde_json::to_value(CrmError::NotFound("Lead not found".into())).unwrap();
        assert_eq!(json, serde_json::json!({"type": "NotFound", "message": "Lead not found"}));
        assert!(!CrmError::Database("locked".into()).is_client_error());
    }
}
