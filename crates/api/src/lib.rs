//! # Keystone API
//!
//! HTTP application layer - routes, error envelopes and entry point.
//!
//! This crate contains:
//! - Collection and item routes for every CRM entity, plus health probes
//! - The mapping from domain errors to HTTP responses
//! - Application context (dependency injection)
//! - Tracing setup and request logging
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires SQLite stores into entity services
//! - Handlers only see `EntityService`, so stores can be substituted in
//!   tests

pub mod context;
pub mod errors;
pub mod routes;
pub mod utils;

pub use context::*;
pub use errors::{ApiError, Operation};
pub use routes::{build_router, entity_router};
