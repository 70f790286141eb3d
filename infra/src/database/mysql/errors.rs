//! Translation of SQLx errors into the domain taxonomy

use tracing::error;
use ww_core::errors::DomainError;

/// Map a SQLx error raised while touching `resource`
///
/// * missing row → `NotFound`
/// * unique or foreign-key violation → `Conflict`
/// * anything else → `Internal`
pub fn to_domain_error(err: sqlx::Error, resource: &str) -> DomainError {
    match &err {
        sqlx::Error::RowNotFound => DomainError::not_found(resource),
        sqlx::Error::Database(db) if db.is_unique_violation() => DomainError::Conflict {
            message: format!("{} violates a unique constraint", resource),
        },
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => DomainError::Conflict {
            message: format!("{} violates a foreign key constraint", resource),
        },
        _ => {
            error!(resource, error = %err, "Database operation failed");
            DomainError::internal(format!("Database operation on {} failed: {}", resource, err))
        }
    }
}
