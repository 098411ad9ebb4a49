//! Liveness and database health probes.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::error;

use crate::errors::ApiError;
use crate::utils::logging::error_label;
use crate::AppContext;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    lead_count: Option<i64>,
    timestamp: String,
}

pub fn health_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/health/db", get(database_health))
        .with_state(ctx)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { message: "API is working!", lead_count: None, timestamp: now() })
}

async fn database_health(
    State(ctx): State<Arc<AppContext>>,
) -> Result<Json<HealthResponse>, ApiError> {
    match ctx.leads.count().await {
        Ok(count) => Ok(Json(HealthResponse {
            message: "Database connection successful!",
            lead_count: Some(count),
            timestamp: now(),
        })),
        Err(err) => {
            error!(error_type = error_label(&err), error = %err, "database_health_failed");
            Err(ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Database connection failed"))
        }
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
