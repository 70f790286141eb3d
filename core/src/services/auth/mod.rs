//! Authentication service module
//!
//! Password login and the credential hashing seam:
//! - Password hashing on the blocking pool
//! - Email and password login issuing an access token
//! - Token refresh

mod config;
mod hasher;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use hasher::PasswordHasher;
pub use service::{AuthService, LoginOutcome};
