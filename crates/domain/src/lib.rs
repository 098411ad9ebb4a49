//! # Keystone Domain
//!
//! Business domain types for the Keystone CRM.
//!
//! This crate contains:
//! - Entity records (Lead, Contact, Account, ...) and their relation views
//! - Create payloads (`*Input`), validated records (`New*`) and partial
//!   updates (`*Patch`)
//! - [`EntityKind`], naming each entity on the wire
//! - Domain error types and Result definitions
//! - Configuration structures and constants
//!
//! ## Architecture
//! - No dependencies on other Keystone crates
//! - Pure data structures; validation lives in `keystone-core`

pub mod config;
pub mod constants;
pub mod dates;
pub mod errors;
pub mod kinds;
pub mod macros;
pub mod types;

pub use config::*;
pub use errors::*;
pub use kinds::EntityKind;
pub use types::*;
