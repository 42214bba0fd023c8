//! Error types for the name guard library.
//!
//! All fallible library operations return [`GuardError`]. Failures of the
//! external lookup services used during validation never surface here; they
//! are absorbed at the lookup boundary (see [`crate::sources::guarded`]).

use thiserror::Error;

use crate::sources::SourceError;

/// The main error type for the name guard library.
#[derive(Error, Debug)]
pub enum GuardError {
    /// Error related to configuration (bad file, missing key, bad endpoint).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error when caller-supplied input is rejected before any work is done.
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput {
        /// Which input was rejected (e.g. "name", "address")
        field: String,
        /// Why it was rejected
        message: String,
    },

    /// Error from an external service client.
    #[error("{service} error: {source}")]
    Source {
        /// Name of the service (e.g. "geocoding", "places")
        service: String,
        /// Underlying client error
        #[source]
        source: SourceError,
    },

    /// Error from I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, GuardError>`.
pub type Result<T> = std::result::Result<T, GuardError>;

impl GuardError {
    /// Creates a new invalid input error.
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Wraps a client error with the name of the service that produced it.
    pub fn service(service: impl Into<String>, source: SourceError) -> Self {
        Self::Source {
            service: service.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for GuardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Adds context to an error.
    fn context(self, msg: &str) -> Result<T>;

    /// Adds context with a lazy message.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<GuardError>,
{
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let base: GuardError = e.into();
            match base {
                GuardError::Internal(inner) => GuardError::Internal(format!("{msg}: {inner}")),
                other => GuardError::Internal(format!("{msg}: {other}")),
            }
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let msg = f();
            let base: GuardError = e.into();
            match base {
                GuardError::Internal(inner) => GuardError::Internal(format!("{msg}: {inner}")),
                other => GuardError::Internal(format!("{msg}: {other}")),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_input_display() {
        let err = GuardError::invalid_input("name", "must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid input for 'name': must not be empty"
        );
    }

    #[test]
    fn test_source_error_preserved() {
        let err = GuardError::service(
            "geocoding",
            SourceError::Network {
                message: "connection refused".to_string(),
            },
        );
        assert!(err.to_string().starts_with("geocoding error"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_context() {
        fn failing_operation() -> Result<()> {
            Err(GuardError::Internal("Something went wrong".to_string()))
        }

        let err = failing_operation()
            .context("While loading blocklist")
            .unwrap_err();
        assert!(err.to_string().contains("While loading blocklist"));
        assert!(err.to_string().contains("Something went wrong"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: GuardError = io.into();
        assert!(matches!(err, GuardError::Io(_)));
    }
}
