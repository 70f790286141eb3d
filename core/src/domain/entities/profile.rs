//! Profile entity: contact and address details owned by an account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One-to-one extension of an [`Account`](super::Account)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Surrogate key
    pub id: u64,

    /// Owning account (unique)
    pub account_id: Uuid,

    pub first_name: String,
    pub last_name: String,
    pub business_name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,

    /// Postal code
    pub zip: String,

    pub country_code: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
}
