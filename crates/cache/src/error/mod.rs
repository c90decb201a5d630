//! Error types and classification for the recency cache
//!
//! The cache has a deliberately small failure surface. Lookups that find
//! nothing are not errors: `get`, `peek`, and `remove` return `None` on a
//! miss so the hot path never pays for error construction. Errors are
//! reserved for:
//!
//! | Situation | Variant | Severity |
//! |-----------|---------|----------|
//! | **Non-positive capacity** | `InvalidArgument` | Error |
//! | **Pop from an empty recency order** | `Empty` | Critical |
//! | **Unparseable configuration text** | `Config` | Error |
//!
//! ## ErrorClassification Trait
//!
//! `CacheError` implements [`ErrorClassification`] so callers embedding the
//! cache in larger systems can route failures through the same retry and
//! alerting logic they use elsewhere:
//!
//! - **`is_retryable()`**: the cache performs no I/O, so nothing is retryable.
//! - **`severity()`**: `Empty` signals a broken internal invariant and is
//!   `Critical`; everything else is a caller mistake at `Error`.
//! - **`is_critical()`**: true only for invariant violations.
//!
//! ## Examples
//!
//! ```
//! use recency_cache::collections::LruCache;
//! use recency_cache::error::{CacheError, ErrorClassification, ErrorSeverity};
//!
//! let err = LruCache::<&str, i32>::try_new(0).unwrap_err();
//! assert!(matches!(err, CacheError::InvalidArgument { .. }));
//! assert_eq!(err.severity(), ErrorSeverity::Error);
//! assert!(!err.is_retryable());
//! ```

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Standard result type using [`CacheError`]
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors raised by cache construction, configuration, and internal
/// structure operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// An argument failed validation (for example a capacity of zero)
    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument { field: String, message: String },

    /// The recency order had no entry to remove
    #[error("Recency order is empty")]
    Empty,

    /// Configuration text could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CacheError {
    /// Create an invalid-argument error for the named field
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument { field: field.into(), message: message.into() }
    }

    /// Create the standard error for a non-positive capacity
    pub fn non_positive_capacity(capacity: impl fmt::Display) -> Self {
        Self::invalid_argument("capacity", format!("must be a positive integer, got {capacity}"))
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<toml::de::Error> for CacheError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Error classification trait for consistent error handling across modules
///
/// Mirrors the classification used by the services that embed the cache, so
/// cache failures can flow through shared retry and alerting paths.
pub trait ErrorClassification {
    /// Check if this error is retryable
    fn is_retryable(&self) -> bool;

    /// Get the error severity level
    ///
    /// Used for monitoring, alerting, and logging decisions.
    fn severity(&self) -> ErrorSeverity;

    /// Check if this is a critical error requiring immediate attention
    fn is_critical(&self) -> bool;

    /// Get the suggested retry delay if applicable
    fn retry_after(&self) -> Option<Duration>;
}

/// Error severity levels for monitoring and alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational, typically for debugging
    Info,
    /// Warning, should be monitored but not critical
    Warning,
    /// Error, requires attention and action
    Error,
    /// Critical, immediate action required
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl ErrorClassification for CacheError {
    fn is_retryable(&self) -> bool {
        false
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidArgument { .. } | Self::Config(_) => ErrorSeverity::Error,
            Self::Empty => ErrorSeverity::Critical,
        }
    }

    fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for error.
    use super::*;

    /// Validates `CacheError::non_positive_capacity` behavior for the invalid
    /// argument message scenario.
    ///
    /// Assertions:
    /// - Confirms the rendered message names the field and the bad value.
    /// - Confirms the variant carries `field == "capacity"`.
    #[test]
    fn test_non_positive_capacity_message() {
        let err = CacheError::non_positive_capacity(-3);
        assert_eq!(
            err.to_string(),
            "Invalid argument 'capacity': must be a positive integer, got -3"
        );
        match err {
            CacheError::InvalidArgument { field, .. } => assert_eq!(field, "capacity"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    /// Validates the classification table.
    ///
    /// Assertions:
    /// - Confirms no variant is retryable.
    /// - Confirms `Empty` is the only critical variant.
    #[test]
    fn test_classification() {
        let invalid = CacheError::invalid_argument("capacity", "zero");
        let empty = CacheError::Empty;
        let config = CacheError::config("bad toml");

        for err in [&invalid, &empty, &config] {
            assert!(!err.is_retryable());
            assert_eq!(err.retry_after(), None);
        }

        assert_eq!(invalid.severity(), ErrorSeverity::Error);
        assert_eq!(config.severity(), ErrorSeverity::Error);
        assert_eq!(empty.severity(), ErrorSeverity::Critical);
        assert!(empty.is_critical());
        assert!(!invalid.is_critical());
    }

    /// Validates `ErrorSeverity` ordering and display.
    #[test]
    fn test_severity_ordering_and_display() {
        assert!(ErrorSeverity::Info < ErrorSeverity::Warning);
        assert!(ErrorSeverity::Warning < ErrorSeverity::Error);
        assert!(ErrorSeverity::Error < ErrorSeverity::Critical);
        assert_eq!(ErrorSeverity::Critical.to_string(), "CRITICAL");
        assert_eq!(ErrorSeverity::Warning.to_string(), "WARN");
    }

    /// Validates `From<toml::de::Error>` for the config conversion scenario.
    #[test]
    fn test_from_toml_error() {
        let parse: Result<toml::Table, _> = toml::from_str("capacity = = 3");
        let err: CacheError = parse.unwrap_err().into();
        assert!(matches!(err, CacheError::Config(_)));
    }
}
