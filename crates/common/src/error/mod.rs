//! Error classification shared by every Keystone error type.
//!
//! Layer-specific errors (`StorageError`, `ValidationError`, the domain
//! error) implement [`ErrorClassification`] so callers can decide on retry
//! and log level without matching on concrete variants.
//!
//! | Level | Use Case | Examples |
//! |-------|----------|----------|
//! | **Info** | Expected conditions | Record not found, invalid input |
//! | **Warning** | Degraded but operational | Busy database, pool exhaustion |
//! | **Error** | Failure requiring attention | Query failure, bad configuration |
//! | **Critical** | System integrity at risk | Migration failure |

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Severity level used for monitoring and log routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl ErrorSeverity {
    /// Stable lowercase label for structured logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standard interface for classifying errors by their characteristics.
pub trait ErrorClassification {
    /// Whether repeating the operation may succeed.
    fn is_retryable(&self) -> bool;

    /// Severity used for monitoring and log level selection.
    fn severity(&self) -> ErrorSeverity;

    /// Whether the error requires immediate attention.
    fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Suggested delay before retrying, if any.
    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flaky;

    impl ErrorClassification for Flaky {
        fn is_retryable(&self) -> bool {
            true
        }

        fn severity(&self) -> ErrorSeverity {
            ErrorSeverity::Warning
        }
    }

    #[test]
    fn default_methods_follow_severity() {
        assert!(Flaky.is_retryable());
        assert!(!Flaky.is_critical());
        assert_eq!(Flaky.retry_after(), None);
    }

    #[test]
    fn severity_orders_by_impact() {
        assert!(ErrorSeverity::Info < ErrorSeverity::Warning);
        assert!(ErrorSeverity::Error < ErrorSeverity::Critical);
        assert_eq!(ErrorSeverity::Critical.to_string(), "critical");
    }
}
