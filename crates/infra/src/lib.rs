//! # Keystone Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The SQLite store behind every `EntityStore` (schema, row mapping,
//!   filters)
//! - The HTTP transport and the typed client for the REST API, including
//!   debounced search
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `keystone-core`
//! - Contains all "impure" code (database and network I/O)

pub mod api;
pub mod config;
pub mod database;
pub mod errors;
pub mod http;

pub use api::{ClientError, CrmClient, DebouncedSearch, EntityClient};
pub use database::{DbManager, SqlRecord, SqliteStore};
pub use errors::InfraError;
pub use http::HttpClient;
