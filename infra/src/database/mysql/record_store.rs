//! MySQL implementation of the RecordStore and RecordTransaction traits.
//!
//! MySQL has no `RETURNING`, so writes are followed by a read of the row
//! inside the same transaction, and deletes read the row before removing
//! it. UUIDs are stored as `CHAR(36)`.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySql, Transaction};
use uuid::Uuid;

use ww_core::domain::entities::{Account, Profile, Role};
use ww_core::domain::value_objects::{
    AccountChanges, NewAccount, NewProfile, NewRole, ProfileChanges, RoleChanges,
};
use ww_core::errors::{DomainError, DomainResult};
use ww_core::repositories::{RecordStore, RecordTransaction};

use super::errors::to_domain_error;
use super::rows::{
    row_to_account, row_to_profile, row_to_role, ACCOUNT_COLUMNS, PROFILE_COLUMNS, ROLE_COLUMNS,
};
use crate::database::connection::DatabasePool;

/// MySQL-backed record store
#[derive(Clone)]
pub struct MySqlRecordStore {
    pool: DatabasePool,
}

impl MySqlRecordStore {
    /// Create a new MySQL record store
    ///
    /// # Arguments
    /// * `pool` - Database pool shared with the rest of the process
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for MySqlRecordStore {
    type Tx = MySqlRecordTx;

    async fn begin(&self) -> DomainResult<MySqlRecordTx> {
        let tx = self
            .pool
            .get_pool()
            .begin()
            .await
            .map_err(|e| to_domain_error(e, "transaction"))?;
        Ok(MySqlRecordTx { tx })
    }

    async fn find_account_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        let query = format!("SELECT {} FROM accounts WHERE email = ? LIMIT 1", ACCOUNT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(self.pool.get_pool())
            .await
            .map_err(|e| to_domain_error(e, "account"))?;

        row.as_ref().map(row_to_account).transpose()
    }

    async fn get_account(&self, id: Uuid) -> DomainResult<Account> {
        let query = format!("SELECT {} FROM accounts WHERE id = ? LIMIT 1", ACCOUNT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_one(self.pool.get_pool())
            .await
            .map_err(|e| to_domain_error(e, "account"))?;

        row_to_account(&row)
    }

    async fn get_role(&self, account_id: Uuid) -> DomainResult<Role> {
        let query = format!("SELECT {} FROM roles WHERE account_id = ? LIMIT 1", ROLE_COLUMNS);

        let row = sqlx::query(&query)
            .bind(account_id.to_string())
            .fetch_one(self.pool.get_pool())
            .await
            .map_err(|e| to_domain_error(e, "role"))?;

        row_to_role(&row)
    }

    async fn list_accounts(&self, limit: u32, offset: u32) -> DomainResult<Vec<Account>> {
        let query = format!(
            "SELECT {} FROM accounts ORDER BY id LIMIT ? OFFSET ?",
            ACCOUNT_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.get_pool())
            .await
            .map_err(|e| to_domain_error(e, "account"))?;

        rows.iter().map(row_to_account).collect()
    }

    async fn health_check(&self) -> DomainResult<()> {
        match self.pool.health_check().await? {
            true => Ok(()),
            false => Err(DomainError::internal("database health check returned an unexpected value")),
        }
    }

    fn statistics(&self) -> Option<String> {
        Some(self.pool.get_statistics().to_string())
    }
}

/// Open MySQL transaction
///
/// Dropping it without commit rolls back and returns the connection to the
/// pool.
pub struct MySqlRecordTx {
    tx: Transaction<'static, MySql>,
}

impl MySqlRecordTx {
    async fn select_account(&mut self, id: Uuid) -> DomainResult<Account> {
        let query = format!("SELECT {} FROM accounts WHERE id = ? LIMIT 1", ACCOUNT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| to_domain_error(e, "account"))?;

        row_to_account(&row)
    }

    async fn select_profile(&mut self, account_id: Uuid) -> DomainResult<Profile> {
        let query = format!("SELECT {} FROM profiles WHERE account_id = ? LIMIT 1", PROFILE_COLUMNS);

        let row = sqlx::query(&query)
            .bind(account_id.to_string())
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| to_domain_error(e, "profile"))?;

        row_to_profile(&row)
    }

    async fn select_role(&mut self, account_id: Uuid) -> DomainResult<Role> {
        let query = format!("SELECT {} FROM roles WHERE account_id = ? LIMIT 1", ROLE_COLUMNS);

        let row = sqlx::query(&query)
            .bind(account_id.to_string())
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| to_domain_error(e, "role"))?;

        row_to_role(&row)
    }
}

#[async_trait]
impl RecordTransaction for MySqlRecordTx {
    async fn create_account(&mut self, params: &NewAccount) -> DomainResult<Account> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO accounts (id, username, email, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(&params.username)
        .bind(&params.email)
        .bind(&params.password_hash)
        .bind(now)
        .bind(now)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| to_domain_error(e, "account"))?;

        self.select_account(id).await
    }

    async fn get_account(&mut self, id: Uuid) -> DomainResult<Account> {
        self.select_account(id).await
    }

    async fn update_account(&mut self, id: Uuid, changes: &AccountChanges) -> DomainResult<Account> {
        sqlx::query(
            r#"
            UPDATE accounts SET
                username = COALESCE(?, username),
                email = COALESCE(?, email),
                password_hash = COALESCE(?, password_hash),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(changes.username.as_deref())
        .bind(changes.email.as_deref())
        .bind(changes.password_hash.as_deref())
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| to_domain_error(e, "account"))?;

        self.select_account(id).await
    }

    async fn delete_account(&mut self, id: Uuid) -> DomainResult<Account> {
        let account = self.select_account(id).await?;

        sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| to_domain_error(e, "account"))?;

        Ok(account)
    }

    async fn create_profile(&mut self, account_id: Uuid, params: &NewProfile) -> DomainResult<Profile> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO profiles (
                account_id, first_name, last_name, business_name,
                street_address, city, state, zip, country_code,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(account_id.to_string())
        .bind(&params.first_name)
        .bind(&params.last_name)
        .bind(&params.business_name)
        .bind(&params.street_address)
        .bind(&params.city)
        .bind(&params.state)
        .bind(&params.zip)
        .bind(&params.country_code)
        .bind(now)
        .bind(now)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| to_domain_error(e, "profile"))?;

        self.select_profile(account_id).await
    }

    async fn get_profile(&mut self, account_id: Uuid) -> DomainResult<Profile> {
        self.select_profile(account_id).await
    }

    async fn update_profile(
        &mut self,
        account_id: Uuid,
        changes: &ProfileChanges,
    ) -> DomainResult<Profile> {
        sqlx::query(
            r#"
            UPDATE profiles SET
                first_name = COALESCE(?, first_name),
                last_name = COALESCE(?, last_name),
                business_name = COALESCE(?, business_name),
                street_address = COALESCE(?, street_address),
                city = COALESCE(?, city),
                state = COALESCE(?, state),
                zip = COALESCE(?, zip),
                country_code = COALESCE(?, country_code),
                updated_at = ?
            WHERE account_id = ?
            "#,
        )
        .bind(changes.first_name.as_deref())
        .bind(changes.last_name.as_deref())
        .bind(changes.business_name.as_deref())
        .bind(changes.street_address.as_deref())
        .bind(changes.city.as_deref())
        .bind(changes.state.as_deref())
        .bind(changes.zip.as_deref())
        .bind(changes.country_code.as_deref())
        .bind(Utc::now())
        .bind(account_id.to_string())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| to_domain_error(e, "profile"))?;

        self.select_profile(account_id).await
    }

    async fn delete_profile(&mut self, account_id: Uuid) -> DomainResult<Profile> {
        let profile = self.select_profile(account_id).await?;

        sqlx::query("DELETE FROM profiles WHERE account_id = ?")
            .bind(account_id.to_string())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| to_domain_error(e, "profile"))?;

        Ok(profile)
    }

    async fn create_role(&mut self, account_id: Uuid, params: &NewRole) -> DomainResult<Role> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO roles (account_id, role_id, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(account_id.to_string())
        .bind(params.role_id)
        .bind(now)
        .bind(now)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| to_domain_error(e, "role"))?;

        self.select_role(account_id).await
    }

    async fn get_role(&mut self, account_id: Uuid) -> DomainResult<Role> {
        self.select_role(account_id).await
    }

    async fn update_role(&mut self, account_id: Uuid, changes: &RoleChanges) -> DomainResult<Role> {
        sqlx::query(
            r#"
            UPDATE roles SET
                role_id = COALESCE(?, role_id),
                updated_at = ?
            WHERE account_id = ?
            "#,
        )
        .bind(changes.role_id)
        .bind(Utc::now())
        .bind(account_id.to_string())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| to_domain_error(e, "role"))?;

        self.select_role(account_id).await
    }

    async fn delete_role(&mut self, account_id: Uuid) -> DomainResult<Role> {
        let role = self.select_role(account_id).await?;

        sqlx::query("DELETE FROM roles WHERE account_id = ?")
            .bind(account_id.to_string())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| to_domain_error(e, "role"))?;

        Ok(role)
    }

    async fn commit(self) -> DomainResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| to_domain_error(e, "transaction"))
    }

    async fn rollback(self) -> DomainResult<()> {
        self.tx
            .rollback()
            .await
            .map_err(|e| to_domain_error(e, "transaction"))
    }
}
