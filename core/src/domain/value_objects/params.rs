//! Input parameters for creating and updating the account aggregate.
//!
//! Profile and role parameters deliberately carry no account id: the
//! transactional engine binds the owning account at write time.

use serde::{Deserialize, Serialize};

use crate::domain::entities::role::ROLE_USER;

/// Fields for a new account row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Fields for a new profile row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProfile {
    pub first_name: String,
    pub last_name: String,
    pub business_name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country_code: String,
}

/// Fields for a new role row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRole {
    pub role_id: i32,
}

impl Default for NewRole {
    fn default() -> Self {
        Self { role_id: ROLE_USER }
    }
}

/// Partial update of an account; `None` leaves a column untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl AccountChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.password_hash.is_none()
    }
}

/// Partial update of a profile; `None` leaves a column untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub business_name: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country_code: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.business_name.is_none()
            && self.street_address.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.zip.is_none()
            && self.country_code.is_none()
    }
}

/// Partial update of a role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleChanges {
    pub role_id: Option<i32>,
}
