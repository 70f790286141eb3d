//! Translation of domain failures into HTTP responses
//!
//! Every failure maps to exactly one status code and one stable error code
//! from [`ww_shared::error_codes`].

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tracing::{debug, error};
use validator::ValidationErrors;
use ww_core::errors::{CancelReason, DomainError, TokenError};
use ww_shared::{error_codes, ErrorResponse};

/// Error returned by handlers, extractors and the bearer gate
#[derive(Debug, thiserror::Error)]
#[error("{}", .body.message)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse::new(code, message),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::BAD_REQUEST, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, error_codes::UNAUTHORIZED, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ErrorResponse {
        &self.body
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(&self.body)
    }
}

// The bearer gate does not use this mapping; it answers every token failure
// with the same 401 body.
impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::ExpiredToken => {
                debug!("Rejected expired token");
                Self::new(StatusCode::UNAUTHORIZED, error_codes::TOKEN_EXPIRED, "Token has expired")
            }
            TokenError::InvalidToken => {
                debug!("Rejected invalid token");
                Self::new(StatusCode::UNAUTHORIZED, error_codes::TOKEN_INVALID, "Token is invalid")
            }
            other => {
                error!(error = %other, "Token engine failure");
                internal_error()
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::Validation { message } => Self::validation(message),
            DomainError::Conflict { message } => {
                Self::new(StatusCode::CONFLICT, error_codes::CONFLICT, message)
            }
            DomainError::NotFound { resource } => Self::new(
                StatusCode::NOT_FOUND,
                error_codes::NOT_FOUND,
                format!("{} not found", resource),
            ),
            DomainError::Unauthorized { message } => Self::unauthorized(message),
            DomainError::Forbidden { message } => {
                Self::new(StatusCode::FORBIDDEN, error_codes::FORBIDDEN, message)
            }
            DomainError::Internal { message } => {
                error!(%message, "Internal error");
                internal_error()
            }
            DomainError::Cancelled { reason } => {
                let status = match reason {
                    CancelReason::DeadlineExceeded => StatusCode::SERVICE_UNAVAILABLE,
                    CancelReason::Cancelled => StatusCode::INTERNAL_SERVER_ERROR,
                };
                Self::new(status, error_codes::REQUEST_CANCELLED, format!("Request {}", reason))
            }
            DomainError::Token(token_error) => token_error.into(),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data");
        for (field, field_errors) in fields {
            let messages: Vec<String> = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            response = response.add_detail(field, messages);
        }

        Self {
            status: StatusCode::BAD_REQUEST,
            body: response,
        }
    }
}

fn internal_error() -> ApiError {
    ApiError::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        error_codes::INTERNAL_ERROR,
        "An internal error occurred",
    )
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    ApiError::from(error).error_response()
}
