//! HTTP routing.
//!
//! [`build_router`] mounts the health probes and the eight entity routers
//! and wraps them in request logging. Unknown paths answer 404 with the
//! usual error envelope.

pub mod entities;
pub mod health;

use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use tower::ServiceBuilder;

pub use entities::entity_router;
pub use health::health_router;

use crate::errors::ApiError;
use crate::utils::logging::log_request;
use crate::AppContext;

/// The complete application router.
pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .merge(health_router(Arc::clone(&ctx)))
        .merge(entity_router(ctx.leads.clone()))
        .merge(entity_router(ctx.contacts.clone()))
        .merge(entity_router(ctx.accounts.clone()))
        .merge(entity_router(ctx.deals.clone()))
        .merge(entity_router(ctx.emails.clone()))
        .merge(entity_router(ctx.tasks.clone()))
        .merge(entity_router(ctx.projects.clone()))
        .merge(entity_router(ctx.project_tasks.clone()))
        .fallback(unknown_route)
        .layer(ServiceBuilder::new().layer(middleware::from_fn(log_requests)))
}

async fn unknown_route() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Not found")
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    log_request(method.as_str(), &path, response.status().as_u16(), started.elapsed());
    response
}
