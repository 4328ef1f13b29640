//! Error types for the store.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors returned by [`Driver`](crate::Driver) operations.
///
/// Every operation fails fast: the first error encountered is returned
/// to the caller unchanged, with no retry.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A collection or resource name was rejected before touching disk.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The resolved path does not exist.
    #[error("unable to find file or dir named {}", path.display())]
    NotFound { path: PathBuf },

    /// Creating a directory failed.
    #[error("failed to create directory {}: {source}", path.display())]
    DirectoryError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing, renaming or removing a file failed.
    #[error("failed to write {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading a file or directory listing failed.
    #[error("failed to read {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoding or decoding JSON failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A thread panicked while holding a store lock.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

impl StoreError {
    /// Returns true if this error means the target does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Returns true if the arguments were rejected before any I/O.
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}
