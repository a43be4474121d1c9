//! Error types.

use thiserror::Error;

/// Error reported by a key-value storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage cannot be reached at all (e.g. no `window` or local storage
    /// is disabled by the browser).
    #[error("storage is not available: {0}")]
    Unavailable(String),

    /// The backend failed to perform an operation.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// Error from the embedded database.
    #[cfg(all(feature = "sled", not(target_arch = "wasm32")))]
    #[error(transparent)]
    Sled(#[from] sled::Error),
}

/// Error returned by annotator operations.
#[derive(Debug, Error)]
pub enum AnnotatorError {
    /// Storage failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A stored blob is not a valid annotation list.
    #[error("stored value for key '{key}' is not a valid annotation list")]
    CorruptData {
        /// Storage key of the blob.
        key: &'static str,
        /// Deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to serialize an annotation list.
    #[error("failed to serialize annotations: {0}")]
    Serialize(#[source] serde_json::Error),
}
