//! MySQL implementations of the record-store capability

mod errors;
mod record_store;
mod rows;

pub use errors::to_domain_error;
pub use record_store::{MySqlRecordStore, MySqlRecordTx};
