//! Errors raised by the external service clients.

use thiserror::Error;

/// Errors that can occur when talking to an external service.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Authentication failed (invalid or missing API key).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Network error (connection failed, timeout, etc.).
    #[error("Network error: {message}")]
    Network { message: String },

    /// Rate limited by the server.
    #[error("Rate limited. Retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    /// Server returned an error.
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Request was rejected as malformed.
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Response body could not be decoded.
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Client could not be built or is missing settings.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl SourceError {
    /// Returns the suggested retry delay in seconds, if available.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            SourceError::RateLimited { retry_after_secs } => *retry_after_secs,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SourceError::Serialization {
                message: err.to_string(),
            }
        } else {
            SourceError::Network {
                message: err.to_string(),
            }
        }
    }
}

/// Result type for external service calls.
pub type SourceResult<T> = std::result::Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_display() {
        let err = SourceError::Authentication {
            message: "REQUEST_DENIED".to_string(),
        };
        assert!(err.to_string().contains("REQUEST_DENIED"));
    }

    #[test]
    fn test_retry_after() {
        assert_eq!(
            SourceError::RateLimited {
                retry_after_secs: Some(30)
            }
            .retry_after(),
            Some(30)
        );
        assert_eq!(
            SourceError::Network {
                message: "timeout".to_string()
            }
            .retry_after(),
            None
        );
    }
}
