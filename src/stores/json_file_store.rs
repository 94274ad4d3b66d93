use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::errors::StorageError;
use crate::stores::RecordStore;

/// RecordStore backed by a pretty-printed JSON object on disk
pub struct JsonFileStore<R> {
    path: PathBuf,
    _records: PhantomData<fn() -> R>,
}

impl<R> JsonFileStore<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _records: PhantomData,
        }
    }

    /// Sibling file the next snapshot is written to before it replaces the original
    fn staging_path(&self) -> PathBuf {
        let mut staging = OsString::from(self.path.as_os_str());
        staging.push(".tmp");
        PathBuf::from(staging)
    }
}

impl<R> RecordStore<R> for JsonFileStore<R>
where
    R: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<BTreeMap<String, R>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Record file missing, starting empty");
                return Ok(BTreeMap::new());
            }
            Err(e) => return Err(StorageError::io("load_records", &self.path, e)),
        };

        let records: BTreeMap<String, R> = serde_json::from_str(&contents)
            .map_err(|e| StorageError::serialization("load_records", &self.path, e))?;

        tracing::debug!(path = %self.path.display(), count = records.len(), "Records loaded");
        Ok(records)
    }

    fn save(&self, records: &BTreeMap<String, R>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| StorageError::io("create_record_dir", parent, e))?;
            }
        }

        let json = serde_json::to_string_pretty(records)
            .map_err(|e| StorageError::serialization("save_records", &self.path, e))?;

        let staging = self.staging_path();
        fs::write(&staging, json).map_err(|e| StorageError::io("save_records", &staging, e))?;
        fs::rename(&staging, &self.path)
            .map_err(|e| StorageError::io("replace_records", &self.path, e))?;

        tracing::debug!(path = %self.path.display(), count = records.len(), "Records saved");
        Ok(())
    }
}
