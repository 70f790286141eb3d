//! Domain entities representing core business objects.

pub mod account;
pub mod profile;
pub mod role;
pub mod session;

// Re-export commonly used types
pub use account::Account;
pub use profile::Profile;
pub use role::{is_admin_role, Role, ROLE_ADMIN, ROLE_USER};
pub use session::SessionClaim;
