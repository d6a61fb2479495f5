use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("short code already exists: {0}")]
    Conflict(String),
    #[error("failed to persist store state: {0}")]
    Persistence(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("could not allocate a unique short code after {0} attempts")]
    CodeSpaceExhausted(usize),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
