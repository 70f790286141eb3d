//! Session token engine
//!
//! This module handles the stateless session credentials:
//! - Symmetric key loading and validation
//! - Token issuance with an explicit lifetime
//! - Decryption, claim recovery and expiry checks
//! - Refresh into a brand-new token

mod key;
mod maker;

#[cfg(test)]
mod tests;

pub use key::SymmetricKey;
pub use maker::{duration_from_secs, LocalTokenMaker, TokenMaker, TOKEN_HEADER};
