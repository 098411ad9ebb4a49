//! Typed client for the Keystone REST API.

pub mod client;
pub mod errors;
pub mod search;

pub use client::{CrmClient, EntityClient};
pub use errors::{ClientError, ClientErrorCategory};
pub use search::{DebouncedSearch, SearchResult};
