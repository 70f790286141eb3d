//! # WhaleWake Core
//!
//! Core business logic and domain layer for the WhaleWake account service.
//! This crate contains the domain entities, the record-store capability and
//! its in-memory implementation, the transactional account engine, the
//! session token engine and the access policy built on top of it.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod utils;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
