//! HTTP transport used by the API client.

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
