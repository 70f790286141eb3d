//! Business services containing domain logic and use cases.

pub mod access;
pub mod account;
pub mod auth;
pub mod context;
pub mod token;

// Re-export commonly used types
pub use access::{authorize_account, authorize_role_change, require_admin};
pub use account::{AccountTransactions, AccountTxService};
pub use auth::{AuthService, AuthServiceConfig, LoginOutcome, PasswordHasher};
pub use context::{CancelHandle, RequestContext};
pub use token::{LocalTokenMaker, SymmetricKey, TokenMaker};
