//! bcrypt implementation of the password hashing capability

use tracing::warn;
use ww_core::errors::{DomainError, DomainResult};
use ww_core::services::PasswordHasher;

/// bcrypt password hasher
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl BcryptPasswordHasher {
    /// Use a custom work factor (4..=31); low values are for tests only
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Failed to hash password: {}", e),
        })
    }

    fn verify(&self, password: &str, hash: &str) -> DomainResult<bool> {
        bcrypt::verify(password, hash).map_err(|e| {
            warn!(error = %e, "Stored password hash could not be parsed");
            DomainError::Internal {
                message: format!("Failed to verify password: {}", e),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = BcryptPasswordHasher::with_cost(4);
        let hash = hasher.hash("secret-password").unwrap();

        assert_ne!(hash, "secret-password");
        assert!(hasher.verify("secret-password", &hash).unwrap());
        assert!(!hasher.verify("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = BcryptPasswordHasher::with_cost(4);
        let first = hasher.hash("same").unwrap();
        let second = hasher.hash("same").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let hasher = BcryptPasswordHasher::default();
        assert_eq!(hasher.cost(), bcrypt::DEFAULT_COST);
        assert!(hasher.verify("secret", "not-a-bcrypt-hash").is_err());
    }
}
