pub mod account;
pub mod auth;

pub use account::*;
pub use auth::*;
