//! In-memory record store with real transaction semantics
//!
//! Used by unit and API tests in place of MySQL. A transaction holds the
//! table lock for its whole lifetime and writes into a working copy; commit
//! swaps the copy in, rollback or drop throws it away. Unique and
//! foreign-key constraints mirror the reference schema, and faults can be
//! injected at any step to exercise rollback paths.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::domain::entities::{Account, Profile, Role};
use crate::domain::value_objects::{
    AccountChanges, NewAccount, NewProfile, NewRole, ProfileChanges, RoleChanges,
};
use crate::errors::{DomainError, DomainResult};

use super::trait_::{RecordStore, RecordTransaction};

/// Places where a fault can be injected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailPoint {
    Begin,
    CreateAccount,
    GetAccount,
    UpdateAccount,
    DeleteAccount,
    CreateProfile,
    GetProfile,
    UpdateProfile,
    DeleteProfile,
    CreateRole,
    GetRole,
    UpdateRole,
    DeleteRole,
    Commit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fault {
    /// Return an `Internal` error
    Error,
    /// Never complete
    Stall,
}

type FaultTable = Arc<RwLock<HashMap<FailPoint, Fault>>>;

#[derive(Debug, Clone, Default)]
struct Tables {
    accounts: BTreeMap<Uuid, Account>,
    profiles: HashMap<Uuid, Profile>,
    roles: HashMap<Uuid, Role>,
    next_profile_id: u64,
    next_role_id: u64,
}

#[derive(Debug, Default)]
struct Counters {
    commits: AtomicUsize,
    rollbacks: AtomicUsize,
}

/// Record store backed by process memory
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    tables: Arc<Mutex<Tables>>,
    faults: FaultTable,
    counters: Arc<Counters>,
}

impl InMemoryRecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the given step fail with an `Internal` error
    pub fn fail_at(&self, point: FailPoint) {
        self.set_fault(point, Fault::Error);
    }

    /// Make the given step hang until the caller gives up on it
    pub fn stall_at(&self, point: FailPoint) {
        self.set_fault(point, Fault::Stall);
    }

    /// Remove every injected fault
    pub fn clear_faults(&self) {
        self.faults
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    fn set_fault(&self, point: FailPoint, fault: Fault) {
        self.faults
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(point, fault);
    }

    pub async fn account_count(&self) -> usize {
        self.tables.lock().await.accounts.len()
    }

    pub async fn profile_count(&self) -> usize {
        self.tables.lock().await.profiles.len()
    }

    pub async fn role_count(&self) -> usize {
        self.tables.lock().await.roles.len()
    }

    /// Number of transactions committed so far
    pub fn commits(&self) -> usize {
        self.counters.commits.load(Ordering::SeqCst)
    }

    /// Number of transactions explicitly rolled back so far
    pub fn rollbacks(&self) -> usize {
        self.counters.rollbacks.load(Ordering::SeqCst)
    }
}

async fn trip(faults: &FaultTable, point: FailPoint) -> DomainResult<()> {
    let fault = faults
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .get(&point)
        .copied();

    match fault {
        Some(Fault::Error) => Err(DomainError::internal(format!(
            "injected failure at {:?}",
            point
        ))),
        Some(Fault::Stall) => {
            std::future::pending::<()>().await;
            Ok(())
        }
        None => Ok(()),
    }
}

fn conflict(message: &str) -> DomainError {
    DomainError::Conflict {
        message: message.to_string(),
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    type Tx = InMemoryTransaction;

    async fn begin(&self) -> DomainResult<InMemoryTransaction> {
        trip(&self.faults, FailPoint::Begin).await?;

        let guard = self.tables.clone().lock_owned().await;
        let working = (*guard).clone();

        Ok(InMemoryTransaction {
            guard,
            working,
            faults: self.faults.clone(),
            counters: self.counters.clone(),
        })
    }

    async fn find_account_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        let tables = self.tables.lock().await;
        Ok(tables.accounts.values().find(|a| a.email == email).cloned())
    }

    async fn get_account(&self, id: Uuid) -> DomainResult<Account> {
        let tables = self.tables.lock().await;
        tables
            .accounts
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("account"))
    }

    async fn get_role(&self, account_id: Uuid) -> DomainResult<Role> {
        let tables = self.tables.lock().await;
        tables
            .roles
            .get(&account_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("role"))
    }

    async fn list_accounts(&self, limit: u32, offset: u32) -> DomainResult<Vec<Account>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .accounts
            .values()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> DomainResult<()> {
        Ok(())
    }

    fn statistics(&self) -> Option<String> {
        Some(format!(
            "in-memory store: {} commits, {} rollbacks",
            self.commits(),
            self.rollbacks()
        ))
    }
}

/// Open transaction on an [`InMemoryRecordStore`]
///
/// Holds the table lock until committed, rolled back or dropped.
pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<Tables>,
    working: Tables,
    faults: FaultTable,
    counters: Arc<Counters>,
}

impl InMemoryTransaction {
    fn email_or_username_taken(&self, username: &str, email: &str, except: Option<Uuid>) -> Option<DomainError> {
        self.working
            .accounts
            .values()
            .filter(|a| Some(a.id) != except)
            .find_map(|a| {
                if a.email == email {
                    Some(conflict("an account with this email already exists"))
                } else if a.username == username {
                    Some(conflict("an account with this username already exists"))
                } else {
                    None
                }
            })
    }
}

#[async_trait]
impl RecordTransaction for InMemoryTransaction {
    async fn create_account(&mut self, params: &NewAccount) -> DomainResult<Account> {
        trip(&self.faults, FailPoint::CreateAccount).await?;

        if let Some(err) = self.email_or_username_taken(&params.username, &params.email, None) {
            return Err(err);
        }

        let account = Account::new(
            params.username.clone(),
            params.email.clone(),
            params.password_hash.clone(),
        );
        self.working.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn get_account(&mut self, id: Uuid) -> DomainResult<Account> {
        trip(&self.faults, FailPoint::GetAccount).await?;

        self.working
            .accounts
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("account"))
    }

    async fn update_account(&mut self, id: Uuid, changes: &AccountChanges) -> DomainResult<Account> {
        trip(&self.faults, FailPoint::UpdateAccount).await?;

        let current = self
            .working
            .accounts
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("account"))?;

        let username = changes.username.clone().unwrap_or(current.username);
        let email = changes.email.clone().unwrap_or(current.email);
        if let Some(err) = self.email_or_username_taken(&username, &email, Some(id)) {
            return Err(err);
        }

        let account = self
            .working
            .accounts
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("account"))?;
        account.username = username;
        account.email = email;
        if let Some(hash) = &changes.password_hash {
            account.password_hash = hash.clone();
        }
        account.updated_at = Utc::now();
        Ok(account.clone())
    }

    async fn delete_account(&mut self, id: Uuid) -> DomainResult<Account> {
        trip(&self.faults, FailPoint::DeleteAccount).await?;

        if self.working.profiles.contains_key(&id) || self.working.roles.contains_key(&id) {
            return Err(conflict("account is still referenced by a profile or role"));
        }

        self.working
            .accounts
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("account"))
    }

    async fn create_profile(&mut self, account_id: Uuid, params: &NewProfile) -> DomainResult<Profile> {
        trip(&self.faults, FailPoint::CreateProfile).await?;

        if !self.working.accounts.contains_key(&account_id) {
            return Err(conflict("profile references a missing account"));
        }
        if self.working.profiles.contains_key(&account_id) {
            return Err(conflict("account already has a profile"));
        }

        self.working.next_profile_id += 1;
        let now = Utc::now();
        let profile = Profile {
            id: self.working.next_profile_id,
            account_id,
            first_name: params.first_name.clone(),
            last_name: params.last_name.clone(),
            business_name: params.business_name.clone(),
            street_address: params.street_address.clone(),
            city: params.city.clone(),
            state: params.state.clone(),
            zip: params.zip.clone(),
            country_code: params.country_code.clone(),
            created_at: now,
            updated_at: now,
            verified_at: None,
        };
        self.working.profiles.insert(account_id, profile.clone());
        Ok(profile)
    }

    async fn get_profile(&mut self, account_id: Uuid) -> DomainResult<Profile> {
        trip(&self.faults, FailPoint::GetProfile).await?;

        self.working
            .profiles
            .get(&account_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("profile"))
    }

    async fn update_profile(
        &mut self,
        account_id: Uuid,
        changes: &ProfileChanges,
    ) -> DomainResult<Profile> {
        trip(&self.faults, FailPoint::UpdateProfile).await?;

        let profile = self
            .working
            .profiles
            .get_mut(&account_id)
            .ok_or_else(|| DomainError::not_found("profile"))?;

        let fields = [
            (&mut profile.first_name, &changes.first_name),
            (&mut profile.last_name, &changes.last_name),
            (&mut profile.business_name, &changes.business_name),
            (&mut profile.street_address, &changes.street_address),
            (&mut profile.city, &changes.city),
            (&mut profile.state, &changes.state),
            (&mut profile.zip, &changes.zip),
            (&mut profile.country_code, &changes.country_code),
        ];
        for (field, change) in fields {
            if let Some(value) = change {
                *field = value.clone();
            }
        }
        profile.updated_at = Utc::now();
        Ok(profile.clone())
    }

    async fn delete_profile(&mut self, account_id: Uuid) -> DomainResult<Profile> {
        trip(&self.faults, FailPoint::DeleteProfile).await?;

        self.working
            .profiles
            .remove(&account_id)
            .ok_or_else(|| DomainError::not_found("profile"))
    }

    async fn create_role(&mut self, account_id: Uuid, params: &NewRole) -> DomainResult<Role> {
        trip(&self.faults, FailPoint::CreateRole).await?;

        if !self.working.accounts.contains_key(&account_id) {
            return Err(conflict("role references a missing account"));
        }
        if self.working.roles.contains_key(&account_id) {
            return Err(conflict("account already has a role"));
        }

        self.working.next_role_id += 1;
        let now = Utc::now();
        let role = Role {
            id: self.working.next_role_id,
            account_id,
            role_id: params.role_id,
            created_at: now,
            updated_at: now,
            verified_at: None,
        };
        self.working.roles.insert(account_id, role.clone());
        Ok(role)
    }

    async fn get_role(&mut self, account_id: Uuid) -> DomainResult<Role> {
        trip(&self.faults, FailPoint::GetRole).await?;

        self.working
            .roles
            .get(&account_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("role"))
    }

    async fn update_role(&mut self, account_id: Uuid, changes: &RoleChanges) -> DomainResult<Role> {
        trip(&self.faults, FailPoint::UpdateRole).await?;

        let role = self
            .working
            .roles
            .get_mut(&account_id)
            .ok_or_else(|| DomainError::not_found("role"))?;
        if let Some(role_id) = changes.role_id {
            role.role_id = role_id;
        }
        role.updated_at = Utc::now();
        Ok(role.clone())
    }

    async fn delete_role(&mut self, account_id: Uuid) -> DomainResult<Role> {
        trip(&self.faults, FailPoint::DeleteRole).await?;

        self.working
            .roles
            .remove(&account_id)
            .ok_or_else(|| DomainError::not_found("role"))
    }

    async fn commit(self) -> DomainResult<()> {
        trip(&self.faults, FailPoint::Commit).await?;

        let InMemoryTransaction {
            mut guard,
            working,
            counters,
            ..
        } = self;
        *guard = working;
        counters.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(self) -> DomainResult<()> {
        self.counters.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
