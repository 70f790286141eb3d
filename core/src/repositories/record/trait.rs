//! Record store traits defining the primitive persistence capability.
//!
//! The store exposes single-entity operations on accounts, profiles and
//! roles. Multi-entity consistency is not its concern: callers open a
//! [`RecordTransaction`], compose whatever steps they need, and decide
//! whether to commit or roll back.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Account, Profile, Role};
use crate::domain::value_objects::{
    AccountChanges, NewAccount, NewProfile, NewRole, ProfileChanges, RoleChanges,
};
use crate::errors::DomainResult;

/// Primitive record store
///
/// Implementations translate storage failures into [`DomainError`]:
/// unique or foreign-key violations become `Conflict`, missing rows become
/// `NotFound`, and everything else becomes `Internal`.
///
/// # Example Implementation
/// ```ignore
/// #[async_trait]
/// impl RecordStore for PgStore {
///     type Tx = PgTx;
///
///     async fn begin(&self) -> DomainResult<PgTx> {
///         // Acquire a pooled connection and issue BEGIN
///     }
///
///     // ... other methods
/// }
/// ```
///
/// [`DomainError`]: crate::errors::DomainError
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Transaction handle produced by [`RecordStore::begin`]
    type Tx: RecordTransaction;

    /// Open a transaction on a dedicated connection
    ///
    /// Dropping the returned handle without calling `commit` discards every
    /// write made through it.
    async fn begin(&self) -> DomainResult<Self::Tx>;

    /// Find an account by email outside any transaction
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account uses this email
    /// * `Err(DomainError)` - Storage failure
    async fn find_account_by_email(&self, email: &str) -> DomainResult<Option<Account>>;

    /// Fetch a single account, `NotFound` if it does not exist
    async fn get_account(&self, id: Uuid) -> DomainResult<Account>;

    /// Fetch the role owned by an account, `NotFound` if it has none
    async fn get_role(&self, account_id: Uuid) -> DomainResult<Role>;

    /// List accounts ordered by id
    ///
    /// # Arguments
    /// * `limit` - Maximum number of accounts to return
    /// * `offset` - Number of accounts to skip
    async fn list_accounts(&self, limit: u32, offset: u32) -> DomainResult<Vec<Account>>;

    /// Check that the backing storage is reachable
    async fn health_check(&self) -> DomainResult<()>;

    /// Human-readable connection statistics, if the store has any
    fn statistics(&self) -> Option<String> {
        None
    }
}

/// A single open transaction
///
/// Profile and role operations are keyed by the owning account id. Delete
/// operations return the row as it was before removal.
#[async_trait]
pub trait RecordTransaction: Send {
    async fn create_account(&mut self, params: &NewAccount) -> DomainResult<Account>;

    async fn get_account(&mut self, id: Uuid) -> DomainResult<Account>;

    async fn update_account(&mut self, id: Uuid, changes: &AccountChanges) -> DomainResult<Account>;

    async fn delete_account(&mut self, id: Uuid) -> DomainResult<Account>;

    async fn create_profile(&mut self, account_id: Uuid, params: &NewProfile) -> DomainResult<Profile>;

    async fn get_profile(&mut self, account_id: Uuid) -> DomainResult<Profile>;

    async fn update_profile(
        &mut self,
        account_id: Uuid,
        changes: &ProfileChanges,
    ) -> DomainResult<Profile>;

    async fn delete_profile(&mut self, account_id: Uuid) -> DomainResult<Profile>;

    async fn create_role(&mut self, account_id: Uuid, params: &NewRole) -> DomainResult<Role>;

    async fn get_role(&mut self, account_id: Uuid) -> DomainResult<Role>;

    async fn update_role(&mut self, account_id: Uuid, changes: &RoleChanges) -> DomainResult<Role>;

    async fn delete_role(&mut self, account_id: Uuid) -> DomainResult<Role>;

    /// Make every write in this transaction durable
    async fn commit(self) -> DomainResult<()>;

    /// Discard every write in this transaction
    async fn rollback(self) -> DomainResult<()>;
}
