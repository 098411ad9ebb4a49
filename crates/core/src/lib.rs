//! # Keystone Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The [`Record`] contract: per-entity validation and defaults
//! - The [`EntityStore`] port implemented by storage adapters
//! - [`ListFilter`], the search/exact-match query built from request
//!   parameters
//! - [`EntityService`], the use cases behind every endpoint
//!
//! ## Architecture Principles
//! - Only depends on `keystone-common` and `keystone-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits

pub mod entities;
pub mod records;

pub use entities::filter::ListFilter;
pub use entities::ports::EntityStore;
pub use entities::service::EntityService;
pub use records::Record;
