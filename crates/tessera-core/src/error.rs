//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for all layers of Tessera.
///
/// Missing users surface as [`TesseraError::NotFound`]; the remaining
/// variants describe failures of the collaborators behind the service.
#[derive(Error, Debug)]
pub enum TesseraError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Notification sink error
    #[error("Messaging error: {0}")]
    Messaging(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TesseraError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Database(_)
            | Self::Configuration(_)
            | Self::Cache(_)
            | Self::Messaging(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Messaging(_) => "MESSAGING_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for TesseraError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for TesseraError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `TesseraError`.
    #[must_use]
    pub fn from_error(error: &TesseraError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }
}

impl From<&TesseraError> for ErrorResponse {
    fn from(error: &TesseraError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(TesseraError::not_found("User", 1).status_code(), 404);
        assert_eq!(TesseraError::validation("invalid email").status_code(), 400);
        assert_eq!(TesseraError::Database("db error".to_string()).status_code(), 500);
        assert_eq!(TesseraError::Cache("down".to_string()).status_code(), 500);
        assert_eq!(TesseraError::Messaging("down".to_string()).status_code(), 500);
        assert_eq!(TesseraError::internal("oops").status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(TesseraError::not_found("User", 1).error_code(), "NOT_FOUND");
        assert_eq!(TesseraError::validation("bad input").error_code(), "VALIDATION_ERROR");
        assert_eq!(TesseraError::Database("db".to_string()).error_code(), "DATABASE_ERROR");
        assert_eq!(TesseraError::Cache("c".to_string()).error_code(), "CACHE_ERROR");
        assert_eq!(TesseraError::Messaging("m".to_string()).error_code(), "MESSAGING_ERROR");
        assert_eq!(TesseraError::internal("err").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_not_found_message() {
        let err = TesseraError::not_found("User", 42);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Resource not found: User with id 42");
    }

    #[test]
    fn test_other_wraps_anyhow() {
        let err: TesseraError = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.status_code(), 500);
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = TesseraError::from(json_err);
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_error_response_from_error() {
        let err = TesseraError::not_found("User", 1);
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "NOT_FOUND");
        assert!(response.message.contains("User"));
    }

    #[test]
    fn test_error_response_from_ref() {
        let err = TesseraError::validation("name: too long");
        let response: ErrorResponse = ErrorResponse::from(&err);
        assert_eq!(response.code, "VALIDATION_ERROR");
    }
}
