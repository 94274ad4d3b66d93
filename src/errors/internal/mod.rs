use thiserror::Error;

pub mod application;
pub mod identity;
pub mod storage;

pub use application::ApplicationError;
pub use identity::IdentityError;
pub use storage::StorageError;

/// Error type for store and service operations
///
/// Hybrid design separates infrastructure errors (storage, crypto, parsing)
/// from domain errors (identity, application lifecycle). Domain errors are
/// ordinary user-facing outcomes; infrastructure errors are not.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto {
        operation: String,
        message: String,
    },

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl InternalError {
    /// Create a parse error with context
    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }

    /// Create a crypto error with context
    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Domain outcomes are reported to the user and the session continues
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::Identity(_) | Self::Application(_))
    }
}
