use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Client not found: {0}")]
    ClientNotFound(i64),

    #[error("Invalid client id: {0}")]
    InvalidId(String),

    #[error("Invalid status lane: {0}")]
    InvalidLane(String),

    #[error("Invalid priority: {0}")]
    InvalidPriority(i64),

    #[error("Invalid sort option: {0}")]
    InvalidSort(String),

    #[error("Unsupported schema version {found}, max supported {supported}")]
    UnsupportedSchemaVersion { found: i64, supported: i64 },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Timestamp parse error: {0}")]
    Timestamp(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
