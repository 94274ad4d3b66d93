// Errors layer - Error type definitions
pub mod internal;

// Re-exports for convenience
pub use internal::{ApplicationError, IdentityError, InternalError, StorageError};
