use crate::error::ShortenerError;
use crate::repository::UrlRecord;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, ShortenerError>;

/// The result of a shorten request.
#[derive(Debug, Clone)]
pub struct ShortenOutcome {
    /// The short code now mapped to the URL.
    pub code: ShortCode,
    /// The stored record behind the code.
    pub record: UrlRecord,
    /// Whether the URL was already shortened before this call.
    pub was_existing: bool,
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Shortens a URL, reusing the existing code if the exact same URL
    /// was shortened before.
    async fn shorten(&self, url: &str) -> Result<ShortenOutcome>;
}
