//! Transactional account engine
//!
//! Composes primitive record-store operations into atomic workflows over
//! the account, profile and role of a single user.

mod service;

#[cfg(test)]
mod tests;

pub use service::{AccountTransactions, AccountTxService};
