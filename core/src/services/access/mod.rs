//! Role-based access decisions over a verified session claim

mod policy;

pub use policy::{authorize_account, authorize_role_change, require_admin};
