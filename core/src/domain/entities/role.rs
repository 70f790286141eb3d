//! Role entity and the role enumeration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Standard user, assigned at registration
pub const ROLE_USER: i32 = 1;

/// Administrator, may act on any account
pub const ROLE_ADMIN: i32 = 3;

/// Whether a role id carries administrator privileges
///
/// Values other than [`ROLE_USER`] and [`ROLE_ADMIN`] are stored as-is and
/// grant nothing special.
pub fn is_admin_role(role_id: i32) -> bool {
    role_id == ROLE_ADMIN
}

/// Role assignment owned by an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Surrogate key
    pub id: u64,

    /// Owning account (unique)
    pub account_id: Uuid,

    /// Role enumeration value
    pub role_id: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        is_admin_role(self.role_id)
    }
}
