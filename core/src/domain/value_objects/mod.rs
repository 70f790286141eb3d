//! Value objects representing immutable domain concepts.

pub mod params;
pub mod tx_result;

// Re-export commonly used types
pub use params::{AccountChanges, NewAccount, NewProfile, NewRole, ProfileChanges, RoleChanges};
pub use tx_result::AccountTxResult;
