//! One-way credential hashing capability

use crate::errors::DomainResult;

/// Hashes and verifies passwords
///
/// Implementations are CPU-bound and synchronous; callers on the async
/// runtime go through [`AuthService`](super::AuthService), which moves the
/// work onto the blocking pool.
pub trait PasswordHasher: Send + Sync + 'static {
    /// Produce a salted hash of `password`
    fn hash(&self, password: &str) -> DomainResult<String>;

    /// Check `password` against a hash produced by [`PasswordHasher::hash`]
    ///
    /// A mismatch is `Ok(false)`; `Err` is reserved for malformed hashes.
    fn verify(&self, password: &str, hash: &str) -> DomainResult<bool>;
}
