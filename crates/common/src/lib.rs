//! Modular common utilities shared across Keystone crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: error classification and validation
//! - `observability`: tracing instrumentation (not included by default)
//! - `platform`: SQLite storage (connection pool, pragmas, storage errors)

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod error;
#[cfg(feature = "foundation")]
pub mod validation;

// Platform tier
// -------------------------------------------------------------------
#[cfg(feature = "platform")]
pub mod storage;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "foundation")]
pub use error::{ErrorClassification, ErrorSeverity};
#[cfg(feature = "foundation")]
pub use validation::{
    EmailValidator, FieldError, FieldValidator, RangeValidator, StringValidator, ValidationError,
    ValidationResult, Validator,
};
