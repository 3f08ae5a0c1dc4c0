//! Storage error types.

/// Storage error.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Record does not exist or was soft-deleted.
    #[error("Not found")]
    NotFound,

    /// Published link is past its expiry.
    #[error("Link expired")]
    Expired,

    /// Request failed validation.
    #[error("{0}")]
    Validation(String),

    /// I/O error (database directory creation).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// JSON (de)serialization error for the variables column.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Malformed stored timestamp.
    #[error("Invalid timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),
}
