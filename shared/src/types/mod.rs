//! Type definitions shared by the HTTP layer
//!
//! - `pagination` - Page parameters for list endpoints
//! - `response` - Health check payloads

pub mod pagination;
pub mod response;

pub use pagination::{PaginatedResponse, Pagination};
pub use response::{HealthResponse, HealthStatus, ServiceHealth};
