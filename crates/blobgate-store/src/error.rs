/// Errors from blob store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The namespace name is empty or contains characters outside `[A-Za-z0-9_-]`.
    #[error("invalid namespace {name:?}: {reason}")]
    InvalidNamespace { name: String, reason: String },

    /// Keys must be non-empty.
    #[error("blob key must not be empty")]
    EmptyKey,

    /// The key cannot be represented by this backend.
    #[error("blob key too long: {len} bytes (max {max})")]
    KeyTooLong { len: usize, max: usize },

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend refused or could not complete the operation.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
