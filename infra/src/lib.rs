//! # Infrastructure Layer
//!
//! Concrete implementations of the capabilities the core crate defines:
//!
//! - **Database**: MySQL connection pool and the MySQL record store (SQLx)
//! - **Security**: bcrypt password hashing
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use ww_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Security module - credential hashing
pub mod security;

#[cfg(feature = "mysql")]
pub use database::{DatabasePool, MySqlRecordStore, PoolStatistics};
pub use security::BcryptPasswordHasher;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Internal {
            message: err.to_string(),
        }
    }
}
