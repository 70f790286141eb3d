//! Route handlers
//!
//! - `accounts` - single-account reads and the admin listing
//! - `usertx` - transactional create/read/update/delete of account, profile and role
//! - `auth` - password login and token refresh
//! - `health` - liveness and store health

pub mod accounts;
pub mod auth;
pub mod health;
pub mod usertx;
