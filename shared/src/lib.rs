//! Shared utilities and common types for the WhaleWake server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error codes and response structures
//! - Pagination for list endpoints
//! - Input validation helpers

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, DatabaseConfig, Environment, ServerConfig, TokenConfig};
pub use errors::{error_codes, ErrorResponse};
pub use types::{HealthResponse, HealthStatus, PaginatedResponse, Pagination, ServiceHealth};
pub use utils::validation;
