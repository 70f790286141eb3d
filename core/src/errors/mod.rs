//! Domain-specific error types and error handling.

mod types;


pub use types::{CancelReason, ErrorCategory, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Request cancelled: {reason}")]
    Cancelled { reason: CancelReason },

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// The wire-level category this error is reported under
    pub fn category(&self) -> ErrorCategory {
        match self {
            DomainError::Validation { .. } => ErrorCategory::Validation,
            DomainError::Conflict { .. } => ErrorCategory::Conflict,
            DomainError::NotFound { .. } => ErrorCategory::NotFound,
            DomainError::Unauthorized { .. } => ErrorCategory::Unauthorized,
            DomainError::Forbidden { .. } => ErrorCategory::Forbidden,
            DomainError::Internal { .. } | DomainError::Cancelled { .. } => ErrorCategory::Internal,
            DomainError::Token(err) => err.category(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        DomainError::Forbidden {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
