use thiserror::Error;

/// Custom error type for storage engine operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] rocksdb::Error),

    #[error("Field {field} doesn't exist in series {series}")]
    UnknownField { field: String, series: String },

    #[error("Decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("Invalid name {0:?}: names must be non-empty and must not contain '~'")]
    InvalidName(String),

    #[error("Corruption detected: {0}")]
    Corruption(String),

    #[error("Lock acquisition failed: {0}")]
    Lock(String),
}

// Implement conversion from lock poison errors for convenience
impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        StoreError::Lock(format!("Mutex poisoned: {}", err))
    }
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, StoreError>;
