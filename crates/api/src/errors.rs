//! HTTP error envelopes.
//!
//! Every handler failure funnels through [`ApiError`], which maps the
//! domain error to a status code and a `{ "error": ... }` body. Store and
//! other server-side failures are logged and replaced by a generic message
//! naming the failed operation.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use keystone_domain::{CrmError, EntityKind};
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::utils::logging::error_label;

/// What the handler was doing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchAll,
    Fetch,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Generic 500 message, e.g. `Failed to fetch leads`.
    pub fn failure_message(self, kind: EntityKind) -> String {
        match self {
            Self::FetchAll => format!("Failed to fetch {}", kind.plural_label()),
            Self::Fetch => format!("Failed to fetch {}", kind.label()),
            Self::Create => format!("Failed to create {}", kind.label()),
            Self::Update => format!("Failed to update {}", kind.label()),
            Self::Delete => format!("Failed to delete {}", kind.label()),
        }
    }
}

/// A failed request, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    status: StatusCode,
    body: Value,
}

impl ApiError {
    /// Map a domain error raised while performing `op` on `kind`.
    pub fn from_crm(kind: EntityKind, op: Operation, err: CrmError) -> Self {
        match err {
            CrmError::NotFound(message) => Self::new(StatusCode::NOT_FOUND, message),
            CrmError::InvalidInput(message) => Self::new(StatusCode::BAD_REQUEST, message),
            CrmError::Validation(issues) => {
                debug!(entity = kind.path_segment(), issues = issues.len(), "validation failed");
                Self {
                    status: StatusCode::BAD_REQUEST,
                    body: json!({ "error": "Validation failed", "details": issues }),
                }
            }
            other => {
                error!(
                    entity = kind.path_segment(),
                    operation = ?op,
                    error_type = error_label(&other),
                    error = %other,
                    "request_failed"
                );
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, op.failure_message(kind))
            }
        }
    }

    /// A body that could not be read as JSON.
    pub fn from_rejection(rejection: &JsonRejection) -> Self {
        debug!(error = %rejection.body_text(), "rejected request body");
        Self::new(StatusCode::BAD_REQUEST, format!("Invalid JSON body: {}", rejection.body_text()))
    }

    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, body: json!({ "error": message.into() }) }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use keystone_domain::FieldIssue;

    use super::*;

    #[test]
    fn failure_messages_use_entity_labels() {
        assert_eq!(Operation::FetchAll.failure_message(EntityKind::Lead), "Failed to fetch leads");
        assert_eq!(
            Operation::FetchAll.failure_message(EntityKind::ProjectTask),
            "Failed to fetch project tasks"
        );
        assert_eq!(Operation::Fetch.failure_message(EntityKind::Deal), "Failed to fetch deal");
        assert_eq!(
            Operation::Create.failure_message(EntityKind::ProjectTask),
            "Failed to create project task"
        );
        assert_eq!(Operation::Delete.failure_message(EntityKind::Email), "Failed to delete email");
    }

    #[test]
    fn client_errors_keep_their_message() {
        let err = ApiError::from_crm(
            EntityKind::Lead,
            Operation::Fetch,
            CrmError::NotFound("Lead not found".into()),
        );
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.body, json!({ "error": "Lead not found" }));

        let err = ApiError::from_crm(
            EntityKind::Deal,
            Operation::Create,
            CrmError::InvalidInput("referenced record does not exist".into()),
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn validation_lists_details() {
        let err = ApiError::from_crm(
            EntityKind::Lead,
            Operation::Create,
            CrmError::Validation(vec![FieldIssue::new("firstName", "is required")]),
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.body,
            json!({
                "error": "Validation failed",
                "details": [{ "field": "firstName", "message": "is required" }]
            })
        );
    }

    #[test]
    fn server_errors_are_generic() {
        let err = ApiError::from_crm(
            EntityKind::Contact,
            Operation::Update,
            CrmError::Database("disk I/O error".into()),
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body, json!({ "error": "Failed to update contact" }));
    }
}
