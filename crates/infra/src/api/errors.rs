//! Client-side error types
//!
//! Every failure of a client call is one of these; transport errors never
//! reach callers directly.

use thiserror::Error;

/// Message used when the server gives no `error` field.
pub const DEFAULT_API_ERROR: &str = "API request failed";

/// Categories of client errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorCategory {
    /// The server rejected the request (4xx)
    Rejected,
    /// The server failed to handle the request (5xx)
    Server,
    /// The server could not be reached
    Unavailable,
    /// The server answered with something the client cannot read
    Protocol,
    /// The client is misconfigured
    Config,
}

/// API client errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    NotFound(String),

    #[error("Unexpected content type: {0}")]
    UnexpectedContentType(String),

    #[error("Server unavailable")]
    Unavailable,

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    pub fn category(&self) -> ClientErrorCategory {
        match self {
            Self::Api { status, .. } if *status >= 500 => ClientErrorCategory::Server,
            Self::Api { .. } | Self::NotFound(_) => ClientErrorCategory::Rejected,
            Self::Unavailable => ClientErrorCategory::Unavailable,
            Self::UnexpectedContentType(_) | Self::Decode(_) => ClientErrorCategory::Protocol,
            Self::Config(_) => ClientErrorCategory::Config,
        }
    }

    /// HTTP status the server answered with, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
