//! Account engine implementation

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::value_objects::{
    AccountChanges, AccountTxResult, NewAccount, NewProfile, NewRole, ProfileChanges, RoleChanges,
};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::record::{RecordStore, RecordTransaction};
use crate::services::context::RequestContext;

/// Atomic operations over an account together with its profile and role
///
/// Every call acquires exactly one transaction, commits only when each
/// step succeeded, and rolls back on the first failure. Nothing is retried.
#[async_trait]
pub trait AccountTransactions: Send + Sync {
    /// Create an account, then its profile, then its role
    ///
    /// The email is checked for uniqueness before the transaction opens;
    /// a taken email yields `Conflict` and nothing is written.
    async fn create_with_profile_and_role(
        &self,
        ctx: &RequestContext,
        account: NewAccount,
        profile: NewProfile,
        role: NewRole,
    ) -> DomainResult<AccountTxResult>;

    /// Read an account, its profile and its role
    async fn get_with_profile_and_role(
        &self,
        ctx: &RequestContext,
        account_id: Uuid,
    ) -> DomainResult<AccountTxResult>;

    /// Update an account, then its profile, then its role
    async fn update_with_profile_and_role(
        &self,
        ctx: &RequestContext,
        account_id: Uuid,
        account: AccountChanges,
        profile: ProfileChanges,
        role: RoleChanges,
    ) -> DomainResult<AccountTxResult>;

    /// Delete the role, then the profile, then the account
    ///
    /// Returns the records as they were before deletion.
    async fn delete_with_profile_and_role(
        &self,
        ctx: &RequestContext,
        account_id: Uuid,
    ) -> DomainResult<AccountTxResult>;
}

/// [`AccountTransactions`] over any [`RecordStore`]
pub struct AccountTxService<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> AccountTxService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The store this engine writes through
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Run `body` inside one transaction
    ///
    /// Commits when `body` succeeds. On failure or cancellation the
    /// transaction is rolled back first; a rollback failure is logged and
    /// the original error is returned.
    async fn exec_tx<T, F>(&self, ctx: &RequestContext, operation: &'static str, body: F) -> DomainResult<T>
    where
        T: Send,
        F: for<'a> FnOnce(&'a mut S::Tx) -> BoxFuture<'a, DomainResult<T>> + Send,
    {
        let mut tx = ctx.run(self.store.begin()).await?;

        let outcome = match ctx.run(body(&mut tx)).await {
            // Signal may have fired between the last step and here.
            Ok(value) => ctx.check().map(|_| value),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                warn!(operation, error = %err, "Transaction step failed, rolling back");
                if let Err(rollback_err) = tx.rollback().await {
                    error!(
                        operation,
                        error = %rollback_err,
                        original_error = %err,
                        "Rollback failed"
                    );
                }
                Err(err)
            }
        }
    }
}

#[async_trait]
impl<S> AccountTransactions for AccountTxService<S>
where
    S: RecordStore + 'static,
{
    async fn create_with_profile_and_role(
        &self,
        ctx: &RequestContext,
        account: NewAccount,
        profile: NewProfile,
        role: NewRole,
    ) -> DomainResult<AccountTxResult> {
        let existing = ctx.run(self.store.find_account_by_email(&account.email)).await?;
        if existing.is_some() {
            return Err(DomainError::Conflict {
                message: "an account with this email already exists".to_string(),
            });
        }

        let result = self
            .exec_tx(ctx, "create_with_profile_and_role", move |tx| {
                Box::pin(async move {
                    let account = tx.create_account(&account).await?;
                    let profile = tx.create_profile(account.id, &profile).await?;
                    let role = tx.create_role(account.id, &role).await?;
                    Ok::<_, DomainError>(AccountTxResult { account, profile, role })
                })
            })
            .await?;

        info!(
            account_id = %result.account.id,
            role_id = result.role.role_id,
            "Account created with profile and role"
        );
        Ok(result)
    }

    async fn get_with_profile_and_role(
        &self,
        ctx: &RequestContext,
        account_id: Uuid,
    ) -> DomainResult<AccountTxResult> {
        self.exec_tx(ctx, "get_with_profile_and_role", move |tx| {
            Box::pin(async move {
                let account = tx.get_account(account_id).await?;
                let profile = tx.get_profile(account_id).await?;
                let role = tx.get_role(account_id).await?;
                Ok::<_, DomainError>(AccountTxResult { account, profile, role })
            })
        })
        .await
    }

    async fn update_with_profile_and_role(
        &self,
        ctx: &RequestContext,
        account_id: Uuid,
        account: AccountChanges,
        profile: ProfileChanges,
        role: RoleChanges,
    ) -> DomainResult<AccountTxResult> {
        let result = self
            .exec_tx(ctx, "update_with_profile_and_role", move |tx| {
                Box::pin(async move {
                    let account = tx.update_account(account_id, &account).await?;
                    let profile = tx.update_profile(account_id, &profile).await?;
                    let role = tx.update_role(account_id, &role).await?;
                    Ok::<_, DomainError>(AccountTxResult { account, profile, role })
                })
            })
            .await?;

        info!(account_id = %account_id, "Account updated with profile and role");
        Ok(result)
    }

    async fn delete_with_profile_and_role(
        &self,
        ctx: &RequestContext,
        account_id: Uuid,
    ) -> DomainResult<AccountTxResult> {
        let result = self
            .exec_tx(ctx, "delete_with_profile_and_role", move |tx| {
                Box::pin(async move {
                    let role = tx.delete_role(account_id).await?;
                    let profile = tx.delete_profile(account_id).await?;
                    let account = tx.delete_account(account_id).await?;
                    Ok::<_, DomainError>(AccountTxResult { account, profile, role })
                })
            })
            .await?;

        info!(account_id = %account_id, "Account deleted with profile and role");
        Ok(result)
    }
}
