//! Errors surfaced by the remote study service.

use std::fmt;

use thiserror::Error;

/// Result type alias for remote operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Failure of a remote operation.
///
/// Transport failures, non-success statuses and undecodable bodies are all
/// reported the same way; callers only distinguish "it failed".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{operation} failed: {reason}")]
    Network { operation: String, reason: String },
}

impl ApiError {
    /// Create a network error for the named operation.
    pub fn network(operation: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Network {
            operation: operation.into(),
            reason: reason.to_string(),
        }
    }

    pub fn operation(&self) -> &str {
        match self {
            Self::Network { operation, .. } => operation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_message() {
        let err = ApiError::network("fetch feed", "status 503");
        assert_eq!(err.to_string(), "fetch feed failed: status 503");
        assert_eq!(err.operation(), "fetch feed");
    }
}
