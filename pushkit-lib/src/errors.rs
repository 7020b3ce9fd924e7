//! Error types for Pushkit operations.
//!
//! Every fallible operation in this crate returns [`PushkitError`]. Hashing
//! and path construction only ever produce `InvalidArgument` or `Internal`;
//! the remaining variants come from the store adapters and the listener.

use std::fmt;

/// Error codes for API responses and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum PushkitErrorCode {
    /// Caller supplied an unusable argument
    InvalidArgument = 1000,
    /// Transport/network layer error
    Transport = 2000,
    /// Connection failed
    ConnectionFailed = 2001,
    /// Connection timeout
    ConnectionTimeout = 2002,
    /// Realtime stream closed by the server
    StreamClosed = 2003,
    /// Authentication/authorization error at the store
    Auth = 3000,
    /// Resource not found
    NotFound = 4000,
    /// Serialization error
    Serialization = 5000,
    /// Configuration could not be resolved
    Configuration = 6000,
    /// Rate limited
    RateLimited = 8000,
    /// Internal/unexpected error
    Internal = 9999,
}

/// Comprehensive error type for Pushkit operations.
#[derive(Debug)]
pub enum PushkitError {
    /// An argument was empty or malformed.
    InvalidArgument {
        /// Field or parameter name
        field: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Transport/network layer error.
    Transport(String),

    /// Connection failed.
    ConnectionFailed {
        /// Target endpoint or service
        target: String,
        /// Underlying error message
        reason: String,
    },

    /// Connection timeout.
    ConnectionTimeout {
        /// Operation that timed out
        operation: String,
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// The realtime stream was cancelled or its credentials revoked.
    StreamClosed(String),

    /// The store rejected our credentials.
    Auth(String),

    /// Resource not found.
    NotFound {
        /// Type of resource (e.g., "path", "service account")
        resource_type: String,
        /// Resource identifier
        identifier: String,
    },

    /// Serialization/deserialization error.
    Serialization(String),

    /// Required configuration is missing or invalid.
    Configuration(String),

    /// Rate limited, should retry after delay.
    RateLimited {
        /// Suggested retry delay in milliseconds
        retry_after_ms: u64,
    },

    /// Internal/unexpected error.
    Internal(String),
}

impl PushkitError {
    /// Get the error code.
    pub fn code(&self) -> PushkitErrorCode {
        match self {
            Self::InvalidArgument { .. } => PushkitErrorCode::InvalidArgument,
            Self::Transport(_) => PushkitErrorCode::Transport,
            Self::ConnectionFailed { .. } => PushkitErrorCode::ConnectionFailed,
            Self::ConnectionTimeout { .. } => PushkitErrorCode::ConnectionTimeout,
            Self::StreamClosed(_) => PushkitErrorCode::StreamClosed,
            Self::Auth(_) => PushkitErrorCode::Auth,
            Self::NotFound { .. } => PushkitErrorCode::NotFound,
            Self::Serialization(_) => PushkitErrorCode::Serialization,
            Self::Configuration(_) => PushkitErrorCode::Configuration,
            Self::RateLimited { .. } => PushkitErrorCode::RateLimited,
            Self::Internal(_) => PushkitErrorCode::Internal,
        }
    }

    /// Get the error message as an owned String.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns true if this error is potentially recoverable by retrying.
    ///
    /// Argument and internal errors never are: hashing is deterministic.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport(_)
                | Self::ConnectionFailed { .. }
                | Self::ConnectionTimeout { .. }
                | Self::RateLimited { .. }
        )
    }

    /// Returns a suggested retry delay in milliseconds, if applicable.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after_ms } => Some(*retry_after_ms),
            Self::ConnectionTimeout { .. } => Some(1000),
            Self::ConnectionFailed { .. } => Some(2000),
            Self::Transport(_) => Some(1000),
            _ => None,
        }
    }

    /// Create a transport error from any error type.
    pub fn transport<E: std::error::Error>(err: E) -> Self {
        Self::Transport(err.to_string())
    }

    /// Create a not found error.
    pub fn not_found(resource_type: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            identifier: identifier.into(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for PushkitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { field, reason } => write!(f, "invalid {}: {}", field, reason),
            Self::Transport(msg) => write!(f, "transport error: {}", msg),
            Self::ConnectionFailed { target, reason } => {
                write!(f, "connection to {} failed: {}", target, reason)
            }
            Self::ConnectionTimeout {
                operation,
                timeout_ms,
            } => {
                write!(f, "{} timed out after {}ms", operation, timeout_ms)
            }
            Self::StreamClosed(reason) => write!(f, "realtime stream closed: {}", reason),
            Self::Auth(msg) => write!(f, "authentication error: {}", msg),
            Self::NotFound {
                resource_type,
                identifier,
            } => {
                write!(f, "{} not found: {}", resource_type, identifier)
            }
            Self::Serialization(msg) => write!(f, "serialization error: {}", msg),
            Self::Configuration(msg) => write!(f, "configuration error: {}", msg),
            Self::RateLimited { retry_after_ms } => {
                write!(f, "rate limited, retry after {}ms", retry_after_ms)
            }
            Self::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for PushkitError {}

impl From<serde_json::Error> for PushkitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = PushkitError::RateLimited {
            retry_after_ms: 1000,
        };
        assert_eq!(err.code(), PushkitErrorCode::RateLimited);
        assert!(err.is_retryable());
        assert_eq!(err.retry_after_ms(), Some(1000));
    }

    #[test]
    fn test_invalid_argument_is_not_retryable() {
        let err = PushkitError::invalid_argument("identifier", "must not be empty");
        assert_eq!(err.code(), PushkitErrorCode::InvalidArgument);
        assert!(!err.is_retryable());
        assert_eq!(err.retry_after_ms(), None);
        assert_eq!(err.to_string(), "invalid identifier: must not be empty");
    }

    #[test]
    fn test_internal_is_not_retryable() {
        let err = PushkitError::Internal("sha256 unavailable".into());
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("internal error"));
    }

    #[test]
    fn test_helper_constructors() {
        let err = PushkitError::not_found("path", "notifications/abc");
        assert_eq!(err.code(), PushkitErrorCode::NotFound);
        assert_eq!(err.to_string(), "path not found: notifications/abc");
    }

    #[test]
    fn test_from_serde_json() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: PushkitError = parse.unwrap_err().into();
        assert_eq!(err.code(), PushkitErrorCode::Serialization);
    }
}
