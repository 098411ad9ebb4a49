//! Shared test helpers for `keystone-core` integration tests.
//!
//! In-memory stores so service behaviour can be tested without a database.

pub mod stores;
