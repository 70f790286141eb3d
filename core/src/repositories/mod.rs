pub mod record;

pub use record::{FailPoint, InMemoryRecordStore, RecordStore, RecordTransaction};
