//! Account entity: the identity half of a user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account
///
/// `email` and `username` are unique across all accounts. The `id` is
/// assigned on creation and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Unique login handle
    pub username: String,

    /// Unique email address
    pub email: String,

    /// One-way hash of the account password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp when the email address was verified, if ever
    pub verified_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Creates a new, unverified account with a fresh id
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
            verified_at: None,
        }
    }

    pub fn is_verified(&self) -> bool {
        self.verified_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_is_unverified() {
        let account = Account::new("orca".into(), "orca@sea.io".into(), "hash".into());
        assert!(!account.is_verified());
        assert_eq!(account.created_at, account.updated_at);
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let account = Account::new("orca".into(), "orca@sea.io".into(), "secret-hash".into());
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("password_hash"));
    }
}
