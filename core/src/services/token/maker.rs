//! Encrypted session token issuance and verification

use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD as BASE64, Engine};
use chrono::{Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use tracing::debug;
use uuid::Uuid;
use ww_shared::TokenConfig;

use crate::domain::entities::SessionClaim;
use crate::errors::TokenError;

use super::key::SymmetricKey;

/// Prefix of every token, also bound into the ciphertext as associated data
pub const TOKEN_HEADER: &str = "v4.local.";

const NONCE_LENGTH: usize = 12;
const TAG_LENGTH: usize = 16;

/// Issues, verifies and refreshes opaque session tokens
pub trait TokenMaker: Send + Sync {
    /// Issue a token for `account_id` that expires `duration` from now
    fn create_token(
        &self,
        account_id: Uuid,
        role_id: i32,
        duration: Duration,
    ) -> Result<(String, SessionClaim), TokenError>;

    /// Recover the claim from a token
    ///
    /// Returns `ExpiredToken` once the current time is past `expires_at`,
    /// `InvalidToken` for anything that fails to decrypt or parse.
    fn verify_token(&self, token: &str) -> Result<SessionClaim, TokenError>;

    /// Verify `token` and issue a brand-new one for the same account and role
    ///
    /// Expired tokens cannot be refreshed.
    fn refresh_token(&self, token: &str) -> Result<(String, SessionClaim), TokenError>;
}

/// AES-256-GCM token maker
///
/// Token layout: `v4.local.` followed by the unpadded URL-safe base64 of
/// `nonce || ciphertext || tag`, where the plaintext is the JSON claim.
pub struct LocalTokenMaker {
    cipher: Aes256Gcm,
    refresh_duration: Duration,
}

impl LocalTokenMaker {
    /// Create a token maker from an already parsed key
    pub fn new(key: &SymmetricKey, refresh_duration: Duration) -> Self {
        let key = Key::<Aes256Gcm>::from_slice(key.as_bytes());
        Self {
            cipher: Aes256Gcm::new(key),
            refresh_duration,
        }
    }

    /// Create a token maker from configuration
    ///
    /// Fails with `MissingKey`, `InvalidKey` or `InvalidDuration` so startup
    /// can abort.
    pub fn from_config(config: &TokenConfig) -> Result<Self, TokenError> {
        let key = SymmetricKey::from_hex(&config.symmetric_key)?;
        let refresh_duration = duration_from_secs(config.refresh_token_duration)?;
        Ok(Self::new(&key, refresh_duration))
    }

    pub fn refresh_duration(&self) -> Duration {
        self.refresh_duration
    }

    fn generate_nonce() -> [u8; NONCE_LENGTH] {
        let mut nonce = [0u8; NONCE_LENGTH];
        OsRng.fill_bytes(&mut nonce);
        nonce
    }

    fn encrypt(&self, claim: &SessionClaim) -> Result<String, TokenError> {
        let plaintext = serde_json::to_vec(claim).map_err(|e| TokenError::GenerationFailed {
            message: e.to_string(),
        })?;

        let nonce = Self::generate_nonce();
        let ciphertext = self
            .cipher
            .encrypt(
                Nonce::from_slice(&nonce),
                Payload {
                    msg: &plaintext,
                    aad: TOKEN_HEADER.as_bytes(),
                },
            )
            .map_err(|e| TokenError::GenerationFailed {
                message: format!("Encryption failed: {}", e),
            })?;

        let mut body = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
        body.extend_from_slice(&nonce);
        body.extend_from_slice(&ciphertext);

        Ok(format!("{}{}", TOKEN_HEADER, BASE64.encode(body)))
    }

    fn decrypt(&self, token: &str) -> Result<SessionClaim, TokenError> {
        let encoded = token
            .strip_prefix(TOKEN_HEADER)
            .ok_or(TokenError::InvalidToken)?;
        let body = BASE64.decode(encoded).map_err(|_| TokenError::InvalidToken)?;
        if body.len() < NONCE_LENGTH + TAG_LENGTH {
            return Err(TokenError::InvalidToken);
        }

        let (nonce, ciphertext) = body.split_at(NONCE_LENGTH);
        let plaintext = self
            .cipher
            .decrypt(
                Nonce::from_slice(nonce),
                Payload {
                    msg: ciphertext,
                    aad: TOKEN_HEADER.as_bytes(),
                },
            )
            .map_err(|_| TokenError::InvalidToken)?;

        serde_json::from_slice(&plaintext).map_err(|_| TokenError::InvalidToken)
    }
}

/// Convert a configured duration in seconds, rejecting values chrono cannot hold
pub fn duration_from_secs(seconds: i64) -> Result<Duration, TokenError> {
    Duration::try_seconds(seconds).ok_or(TokenError::InvalidDuration { seconds })
}

impl TokenMaker for LocalTokenMaker {
    fn create_token(
        &self,
        account_id: Uuid,
        role_id: i32,
        duration: Duration,
    ) -> Result<(String, SessionClaim), TokenError> {
        let claim = SessionClaim::new(account_id, role_id, duration)?;
        let token = self.encrypt(&claim)?;
        Ok((token, claim))
    }

    fn verify_token(&self, token: &str) -> Result<SessionClaim, TokenError> {
        let claim = self.decrypt(token)?;
        if claim.is_expired_at(Utc::now()) {
            debug!(claim_id = %claim.id, expires_at = %claim.expires_at, "Token expired");
            return Err(TokenError::ExpiredToken);
        }
        Ok(claim)
    }

    fn refresh_token(&self, token: &str) -> Result<(String, SessionClaim), TokenError> {
        let claim = self.verify_token(token)?;
        let refreshed = self.create_token(claim.account_id, claim.role_id, self.refresh_duration)?;
        debug!(
            previous_claim_id = %claim.id,
            claim_id = %refreshed.1.id,
            "Token refreshed"
        );
        Ok(refreshed)
    }
}
