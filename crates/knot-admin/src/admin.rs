use crate::Result;
use async_trait::async_trait;
use knot_core::{ShortCode, UrlRecord};

#[async_trait]
pub trait Admin: Send + Sync + 'static {
    /// Returns the full record behind a short code, or `None` if the
    /// code does not exist.
    async fn stats(&self, code: &ShortCode) -> Result<Option<UrlRecord>>;

    /// Lists all records in creation order.
    async fn list(&self) -> Result<Vec<(ShortCode, UrlRecord)>>;

    /// Removes a record. Returns `true` if it existed.
    async fn delete(&self, code: &ShortCode) -> Result<bool>;
}
