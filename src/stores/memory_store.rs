use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::errors::StorageError;
use crate::stores::RecordStore;

/// RecordStore held entirely in memory, for tests and embedding
pub struct MemoryStore<R> {
    records: Mutex<BTreeMap<String, R>>,
}

impl<R> MemoryStore<R> {
    pub fn new() -> Self {
        Self::with_records(BTreeMap::new())
    }

    pub fn with_records(records: BTreeMap<String, R>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl<R> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> RecordStore<R> for MemoryStore<R>
where
    R: Clone + Send,
{
    fn load(&self) -> Result<BTreeMap<String, R>, StorageError> {
        let records = self
            .records
            .lock()
            .map_err(|_| StorageError::poisoned("load_records"))?;
        Ok(records.clone())
    }

    fn save(&self, records: &BTreeMap<String, R>) -> Result<(), StorageError> {
        let mut current = self
            .records
            .lock()
            .map_err(|_| StorageError::poisoned("save_records"))?;
        *current = records.clone();
        Ok(())
    }
}
