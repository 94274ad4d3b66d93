// Stores layer - Record persistence and registry lookups
use std::collections::BTreeMap;

use crate::errors::StorageError;

pub mod application_store;
pub mod json_file_store;
pub mod memory_store;
pub mod user_store;

pub use application_store::{ApplicationStore, IdAllocation};
pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use user_store::UserStore;

/// Whole-collection persistence port
///
/// Every call reads or writes the complete mapping; there are no partial
/// updates and no transactions. A backing resource that does not exist yet
/// loads as an empty mapping.
pub trait RecordStore<R>: Send + Sync {
    fn load(&self) -> Result<BTreeMap<String, R>, StorageError>;

    fn save(&self, records: &BTreeMap<String, R>) -> Result<(), StorageError>;
}
