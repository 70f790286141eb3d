//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

/// Pagination parameters for list endpoints
///
/// Pages are 1-indexed. Bounds are checked by the request DTO before a
/// value of this type is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page_id: u32,

    /// Number of items per page
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_id: 1,
            page_size: 10,
        }
    }
}

impl Pagination {
    /// Create a new pagination with custom values
    pub fn new(page_id: u32, page_size: u32) -> Self {
        Self { page_id, page_size }
    }

    /// Calculate the offset for database queries
    pub fn offset(&self) -> u32 {
        self.page_id.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Get the limit for database queries
    pub fn limit(&self) -> u32 {
        self.page_size
    }
}

/// Paginated response wrapper with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// The actual data items
    pub data: Vec<T>,

    /// Current page number
    pub page_id: u32,

    /// Items per page
    pub page_size: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, pagination: Pagination) -> Self {
        Self {
            data,
            page_id: pagination.page_id,
            page_size: pagination.page_size,
        }
    }

    /// Transform the data items using a function
    pub fn map<U, F>(self, f: F) -> PaginatedResponse<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResponse {
            data: self.data.into_iter().map(f).collect(),
            page_id: self.page_id,
            page_size: self.page_size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
