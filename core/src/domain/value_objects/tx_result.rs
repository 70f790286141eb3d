//! Aggregate returned by every transactional account operation.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Account, Profile, Role};

/// An account together with its profile and role, as read or written in one
/// transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTxResult {
    pub account: Account,
    pub profile: Profile,
    pub role: Role,
}
