//! Symmetric key for session token encryption

use std::fmt;

use rand::{rngs::OsRng, RngCore};

use crate::errors::TokenError;

/// Key length required by AES-256-GCM
pub const KEY_LENGTH: usize = 32;

/// 256-bit key shared by every token this process issues or verifies
#[derive(Clone, PartialEq, Eq)]
pub struct SymmetricKey([u8; KEY_LENGTH]);

impl SymmetricKey {
    /// Parse a hex-encoded key
    ///
    /// # Errors
    ///
    /// * `MissingKey` - the input is empty or whitespace
    /// * `InvalidKey` - the input is not hex or does not decode to 32 bytes
    pub fn from_hex(encoded: &str) -> Result<Self, TokenError> {
        let encoded = encoded.trim();
        if encoded.is_empty() {
            return Err(TokenError::MissingKey);
        }

        let bytes = hex::decode(encoded).map_err(|e| TokenError::InvalidKey {
            reason: e.to_string(),
        })?;

        Self::from_bytes(&bytes)
    }

    /// Use raw key bytes, which must be exactly 32 long
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TokenError> {
        let key: [u8; KEY_LENGTH] = bytes.try_into().map_err(|_| TokenError::InvalidKey {
            reason: format!("expected {} bytes, got {}", KEY_LENGTH, bytes.len()),
        })?;
        Ok(Self(key))
    }

    /// Generate a fresh random key
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_LENGTH];
        OsRng.fill_bytes(&mut key);
        Self(key)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey(<redacted>)")
    }
}
