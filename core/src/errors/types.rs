//! Error categories and token-specific error types

use std::fmt;

use thiserror::Error;

/// The six categories every failure is reported under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    Unauthorized,
    Forbidden,
    Internal,
}

/// Why an in-flight operation was abandoned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The caller withdrew the request
    Cancelled,
    /// The request deadline elapsed
    DeadlineExceeded,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::Cancelled => write!(f, "cancelled by caller"),
            CancelReason::DeadlineExceeded => write!(f, "deadline exceeded"),
        }
    }
}

/// Token-related errors
///
/// `MissingKey`, `InvalidKey` and `InvalidDuration` only surface when the
/// token engine is constructed. `InvalidToken` and `ExpiredToken` are kept apart so callers
/// can log the difference even though both reach clients as 401.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token symmetric key is not configured")]
    MissingKey,

    #[error("Invalid token symmetric key: {reason}")]
    InvalidKey { reason: String },

    #[error("Token is invalid")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Token generation failed: {message}")]
    GenerationFailed { message: String },

    #[error("Token duration of {seconds}s is out of range")]
    InvalidDuration { seconds: i64 },
}

impl TokenError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TokenError::InvalidToken | TokenError::ExpiredToken => ErrorCategory::Unauthorized,
            TokenError::MissingKey
            | TokenError::InvalidKey { .. }
            | TokenError::GenerationFailed { .. }
            | TokenError::InvalidDuration { .. } => ErrorCategory::Internal,
        }
    }
}
