//! Request and response bodies for the account routes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};
use ww_core::domain::entities::Account;
use ww_core::domain::value_objects::{
    AccountChanges, AccountTxResult, NewAccount, NewProfile, ProfileChanges, RoleChanges,
};
use ww_shared::validation::{COUNTRY_CODE_REGEX, USERNAME_REGEX};
use ww_shared::Pagination;

/// bcrypt ignores everything past this many bytes of input
pub const BCRYPT_MAX_PASSWORD_BYTES: usize = 72;

/// Reject passwords bcrypt would silently truncate
///
/// The length rule counts characters, so a multibyte password can pass it
/// and still exceed the byte limit.
fn password_fits_bcrypt(password: &str) -> Result<(), ValidationError> {
    if password.len() > BCRYPT_MAX_PASSWORD_BYTES {
        let mut error = ValidationError::new("password_too_long");
        error.message = Some(format!("password must be at most {} bytes", BCRYPT_MAX_PASSWORD_BYTES).into());
        return Err(error);
    }
    Ok(())
}

/// Body of `POST /usertx`
///
/// The role is not accepted from the client; new accounts are standard
/// users.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAccountRequest {
    #[validate(length(min = 1, max = 64), regex(path = "USERNAME_REGEX"))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 32), custom = "password_fits_bcrypt")]
    pub password: String,

    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(length(min = 1, max = 255))]
    pub business_name: String,

    #[validate(length(min = 1, max = 255))]
    pub street_address: String,

    #[validate(length(min = 1, max = 100))]
    pub city: String,

    #[validate(length(min = 1, max = 100))]
    pub state: String,

    #[validate(length(min = 1, max = 20))]
    pub zip: String,

    #[validate(regex(path = "COUNTRY_CODE_REGEX"))]
    pub country_code: String,
}

impl CreateAccountRequest {
    /// Split into engine parameters once the password has been hashed
    pub fn into_params(self, password_hash: String) -> (NewAccount, NewProfile) {
        let account = NewAccount {
            username: self.username,
            email: self.email,
            password_hash,
        };
        let profile = NewProfile {
            first_name: self.first_name,
            last_name: self.last_name,
            business_name: self.business_name,
            street_address: self.street_address,
            city: self.city,
            state: self.state,
            zip: self.zip,
            country_code: self.country_code,
        };
        (account, profile)
    }
}

/// Body of `PUT /usertx`; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    pub id: Uuid,

    #[validate(length(min = 1, max = 64), regex(path = "USERNAME_REGEX"))]
    pub username: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 32), custom = "password_fits_bcrypt")]
    pub password: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub business_name: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub street_address: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub state: Option<String>,

    #[validate(length(min = 1, max = 20))]
    pub zip: Option<String>,

    #[validate(regex(path = "COUNTRY_CODE_REGEX"))]
    pub country_code: Option<String>,

    pub role_id: Option<i32>,
}

impl UpdateAccountRequest {
    pub fn into_changes(
        self,
        password_hash: Option<String>,
    ) -> (AccountChanges, ProfileChanges, RoleChanges) {
        let account = AccountChanges {
            username: self.username,
            email: self.email,
            password_hash,
        };
        let profile = ProfileChanges {
            first_name: self.first_name,
            last_name: self.last_name,
            business_name: self.business_name,
            street_address: self.street_address,
            city: self.city,
            state: self.state,
            zip: self.zip,
            country_code: self.country_code,
        };
        let role = RoleChanges {
            role_id: self.role_id,
        };
        (account, profile, role)
    }
}

/// Query string of `GET /users`
///
/// Pages are 1-indexed.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct ListAccountsQuery {
    #[validate(range(min = 1, message = "page_id must be at least 1"))]
    pub page_id: u32,

    #[validate(range(min = 1, max = 100, message = "page_size must be between 1 and 100"))]
    pub page_size: u32,
}

impl From<ListAccountsQuery> for Pagination {
    fn from(query: ListAccountsQuery) -> Self {
        Pagination::new(query.page_id, query.page_size)
    }
}

/// Public view of an account; the password hash never leaves the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            created_at: account.created_at,
            updated_at: account.updated_at,
            verified_at: account.verified_at,
        }
    }
}

/// Account, profile and role flattened into one body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountTxResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub business_name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country_code: String,
    pub role_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
}

impl From<AccountTxResult> for AccountTxResponse {
    fn from(result: AccountTxResult) -> Self {
        let AccountTxResult {
            account,
            profile,
            role,
        } = result;

        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            business_name: profile.business_name,
            street_address: profile.street_address,
            city: profile.city,
            state: profile.state,
            zip: profile.zip,
            country_code: profile.country_code,
            role_id: role.role_id,
            created_at: account.created_at,
            updated_at: account.updated_at,
            verified_at: account.verified_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateAccountRequest {
        CreateAccountRequest {
            username: "orca_01".to_string(),
            email: "orca@whalewake.test".to_string(),
            password: "correct-horse".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Orca".to_string(),
            business_name: "Pod Ltd".to_string(),
            street_address: "1 Harbour Rd".to_string(),
            city: "Victoria".to_string(),
            state: "BC".to_string(),
            zip: "V8W".to_string(),
            country_code: "CA".to_string(),
        }
    }

    #[test]
    fn test_valid_create_request() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_create_request_rules() {
        let mut request = valid_request();
        request.password = "short".to_string();
        request.email = "nope".to_string();
        request.country_code = "can".to_string();
        request.username = "has space".to_string();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("country_code"));
        assert!(fields.contains_key("username"));
    }

    #[test]
    fn test_password_upper_bound() {
        let mut request = valid_request();
        request.password = "x".repeat(33);
        assert!(request.validate().is_err());
        request.password = "x".repeat(32);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_multibyte_password_over_bcrypt_limit() {
        // 32 characters, 96 bytes
        let mut request = valid_request();
        request.password = "鯨".repeat(32);
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));

        // 24 characters, 72 bytes
        request.password = "鯨".repeat(24);
        assert!(request.validate().is_ok());

        let update = UpdateAccountRequest {
            id: Uuid::new_v4(),
            password: Some("鯨".repeat(32)),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_update_request_only_checks_present_fields() {
        let request = UpdateAccountRequest {
            id: Uuid::new_v4(),
            city: Some("Nanaimo".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_ok());

        let request = UpdateAccountRequest {
            id: Uuid::new_v4(),
            email: Some("broken".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_into_changes_keeps_absent_fields_empty() {
        let request = UpdateAccountRequest {
            id: Uuid::new_v4(),
            zip: Some("V9R".to_string()),
            role_id: Some(3),
            ..Default::default()
        };
        let (account, profile, role) = request.into_changes(None);
        assert!(account.is_empty());
        assert_eq!(profile.zip.as_deref(), Some("V9R"));
        assert!(profile.first_name.is_none());
        assert_eq!(role.role_id, Some(3));
    }

    #[test]
    fn test_list_query_bounds() {
        let query = |page_id, page_size| ListAccountsQuery { page_id, page_size };

        assert!(query(1, 1).validate().is_ok());
        assert!(query(7, 100).validate().is_ok());

        let errors = query(0, 101).validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("page_id"));
        assert!(fields.contains_key("page_size"));

        assert!(query(1, 0).validate().is_err());
    }

}
