//! Access policy
//!
//! An operation on a specific account is allowed for the account itself or
//! for an administrator. Listing and deleting accounts are admin-only.

use tracing::warn;
use uuid::Uuid;

use crate::domain::entities::SessionClaim;
use crate::errors::{DomainError, DomainResult};

/// Allow when the caller owns `target` or is an administrator
pub fn authorize_account(claim: &SessionClaim, target: Uuid) -> DomainResult<()> {
    if claim.account_id == target || claim.is_admin() {
        return Ok(());
    }

    warn!(
        account_id = %claim.account_id,
        target = %target,
        "Access to another account denied"
    );
    Err(DomainError::forbidden("account doesn't belong to the authenticated user"))
}

/// Allow administrators only
pub fn require_admin(claim: &SessionClaim) -> DomainResult<()> {
    if claim.is_admin() {
        return Ok(());
    }

    warn!(account_id = %claim.account_id, role_id = claim.role_id, "Admin-only operation denied");
    Err(DomainError::forbidden("administrator role required"))
}

/// Allow a role change only for administrators
///
/// Submitting the caller's current role is not a change.
pub fn authorize_role_change(claim: &SessionClaim, requested: Option<i32>) -> DomainResult<()> {
    match requested {
        Some(role_id) if role_id != claim.role_id => require_admin(claim),
        _ => Ok(()),
    }
}
