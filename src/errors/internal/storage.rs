use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage error: {operation} failed for {}: {source}", .path.display())]
    Io {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {operation} failed for {}: {source}", .path.display())]
    Serialization {
        operation: String,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage error: {operation} failed: lock poisoned")]
    Poisoned { operation: String },
}

impl StorageError {
    pub fn io(operation: &str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.to_string(),
            path: path.into(),
            source,
        }
    }

    pub fn serialization(
        operation: &str,
        path: impl Into<PathBuf>,
        source: serde_json::Error,
    ) -> Self {
        Self::Serialization {
            operation: operation.to_string(),
            path: path.into(),
            source,
        }
    }

    pub fn poisoned(operation: &str) -> Self {
        Self::Poisoned {
            operation: operation.to_string(),
        }
    }
}
