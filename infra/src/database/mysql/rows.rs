//! Row to entity conversion

use sqlx::mysql::{MySql, MySqlRow};
use sqlx::{Decode, Row, Type};
use uuid::Uuid;
use ww_core::domain::entities::{Account, Profile, Role};
use ww_core::errors::{DomainError, DomainResult};

pub(super) const ACCOUNT_COLUMNS: &str =
    "id, username, email, password_hash, created_at, updated_at, verified_at";

pub(super) const PROFILE_COLUMNS: &str = "id, account_id, first_name, last_name, business_name, \
     street_address, city, state, zip, country_code, created_at, updated_at, verified_at";

pub(super) const ROLE_COLUMNS: &str =
    "id, account_id, role_id, created_at, updated_at, verified_at";

fn column<'r, T>(row: &'r MySqlRow, name: &str) -> DomainResult<T>
where
    T: Decode<'r, MySql> + Type<MySql>,
{
    row.try_get(name)
        .map_err(|e| DomainError::internal(format!("Failed to get {}: {}", name, e)))
}

fn uuid_column(row: &MySqlRow, name: &str) -> DomainResult<Uuid> {
    let raw: String = column(row, name)?;
    Uuid::parse_str(&raw).map_err(|e| DomainError::internal(format!("Invalid UUID in {}: {}", name, e)))
}

pub(super) fn row_to_account(row: &MySqlRow) -> DomainResult<Account> {
    Ok(Account {
        id: uuid_column(row, "id")?,
        username: column(row, "username")?,
        email: column(row, "email")?,
        password_hash: column(row, "password_hash")?,
        created_at: column(row, "created_at")?,
        updated_at: column(row, "updated_at")?,
        verified_at: column(row, "verified_at")?,
    })
}

pub(super) fn row_to_profile(row: &MySqlRow) -> DomainResult<Profile> {
    Ok(Profile {
        id: column(row, "id")?,
        account_id: uuid_column(row, "account_id")?,
        first_name: column(row, "first_name")?,
        last_name: column(row, "last_name")?,
        business_name: column(row, "business_name")?,
        street_address: column(row, "street_address")?,
        city: column(row, "city")?,
        state: column(row, "state")?,
        zip: column(row, "zip")?,
        country_code: column(row, "country_code")?,
        created_at: column(row, "created_at")?,
        updated_at: column(row, "updated_at")?,
        verified_at: column(row, "verified_at")?,
    })
}

pub(super) fn row_to_role(row: &MySqlRow) -> DomainResult<Role> {
    Ok(Role {
        id: column(row, "id")?,
        account_id: uuid_column(row, "account_id")?,
        role_id: column(row, "role_id")?,
        created_at: column(row, "created_at")?,
        updated_at: column(row, "updated_at")?,
        verified_at: column(row, "verified_at")?,
    })
}
