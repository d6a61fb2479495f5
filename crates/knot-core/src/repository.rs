use crate::error::StorageError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A stored URL record in the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// The original URL that was shortened.
    pub original_url: String,
    /// When the record was created. Set once, immutable thereafter.
    pub created_at: Timestamp,
    /// How many times the short code has been resolved.
    pub clicks: u64,
}

impl UrlRecord {
    /// Creates a fresh record for a newly shortened URL.
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            created_at: Timestamp::now(),
            clicks: 0,
        }
    }
}

/// The record store contract.
///
/// The store is the single source of truth for URL records. All
/// mutating operations are atomic with respect to concurrent callers:
/// two concurrent `insert`s of the same code yield exactly one success
/// and one `Conflict`, and concurrent `increment_clicks` calls never
/// lose an update.
#[async_trait]
pub trait Repository: Send + Sync + 'static {
    /// Inserts a new URL record. Returns `Err(Conflict)` if the code
    /// already exists.
    async fn insert(&self, code: &ShortCode, record: UrlRecord) -> Result<()>;

    /// Retrieves the URL record for a given short code.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>>;

    /// Finds the record whose `original_url` exactly matches `url`.
    ///
    /// If more than one record matches, the earliest-created one wins.
    async fn find_by_url(&self, url: &str) -> Result<Option<(ShortCode, UrlRecord)>>;

    /// Atomically increments the click counter for a short code and
    /// returns the updated record, or `None` if the code is absent.
    async fn increment_clicks(&self, code: &ShortCode) -> Result<Option<UrlRecord>>;

    /// Deletes the URL record for a given short code.
    /// Returns `true` if the record existed and was removed.
    async fn delete(&self, code: &ShortCode) -> Result<bool>;

    /// Lists all records in creation order.
    async fn list(&self) -> Result<Vec<(ShortCode, UrlRecord)>>;
}
