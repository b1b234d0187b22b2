use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("short code not found: {0}")]
    NotFound(String),
    #[error("short code already exists: {0}")]
    Conflict(String),
    #[error("snapshot io failed: {0}")]
    Io(String),
    #[error("snapshot is malformed: {0}")]
    Decode(String),
    #[error("snapshot serialization failed: {0}")]
    Serialization(String),
    #[error("mapping table lock is poisoned")]
    LockPoisoned,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("short code not found: {0}")]
    NotFound(String),
    #[error("no free short code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for ShortenerError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::NotFound(code) => Self::NotFound(code),
            other => Self::Storage(other.to_string()),
        }
    }
}
