//! Storage-specific error type of the in-memory store.

use crudhub_domain::error::CrudError;

/// Errors originating from the in-memory storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A thread panicked while holding the store lock.
    #[error("store lock poisoned")]
    Poisoned,

    /// An entity could not be converted to JSON for sorting.
    #[error("JSON serialization error")]
    Json(#[from] serde_json::Error),
}

impl From<StorageError> for CrudError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
