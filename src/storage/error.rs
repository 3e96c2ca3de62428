/// Error types for storage operations

use thiserror::Error;

/// Storage operation errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// Record not found
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    /// Unique field already taken
    #[error("{kind} already exists: {key}")]
    Conflict { kind: &'static str, key: String },

    /// Counter overflow
    #[error("Counter overflow for kind: {0}")]
    CounterOverflow(String),

    /// Index entry that cannot be decoded
    #[error("Corrupt index entry: {0}")]
    CorruptIndex(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// RocksDB error
    #[error("RocksDB error: {0}")]
    RocksDbError(#[from] rocksdb::Error),

    /// UTF-8 conversion error
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),
}

impl StorageError {
    pub fn not_found(kind: &'static str, key: impl ToString) -> Self {
        StorageError::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    pub fn conflict(kind: &'static str, key: impl ToString) -> Self {
        StorageError::Conflict {
            kind,
            key: key.to_string(),
        }
    }

    /// True for uniqueness violations
    pub fn is_conflict(&self) -> bool {
        matches!(self, StorageError::Conflict { .. })
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
