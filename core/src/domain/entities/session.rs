//! Session claim carried inside an encrypted token.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TokenError;

use super::role::is_admin_role;

/// Claims recovered from a verified session token
///
/// Created at issuance and reconstructed at verification. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaim {
    /// Random id, unique per issuance
    pub id: Uuid,

    /// Account the session belongs to
    pub account_id: Uuid,

    /// Role of the account at issuance
    pub role_id: i32,

    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionClaim {
    /// Issue a claim starting now and lasting `duration`
    ///
    /// Zero or negative durations produce a claim that is already expired.
    /// Fails with `GenerationFailed` when the expiry is not representable.
    pub fn new(account_id: Uuid, role_id: i32, duration: Duration) -> Result<Self, TokenError> {
        let issued_at = Utc::now();
        let expires_at = issued_at
            .checked_add_signed(duration)
            .ok_or_else(|| TokenError::GenerationFailed {
                message: format!("token duration of {} is out of range", duration),
            })?;

        Ok(Self {
            id: Uuid::new_v4(),
            account_id,
            role_id,
            issued_at,
            expires_at,
        })
    }

    /// A claim is valid through its exact expiry instant and invalid after it.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_admin(&self) -> bool {
        is_admin_role(self.role_id)
    }
}
