use jiff::Timestamp;
use knot_core::ShortenOutcome;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
    pub short_code: String,
    pub original_url: String,
    pub existing: bool,
}

impl ShortenResponse {
    pub fn from_outcome(outcome: &ShortenOutcome, base_url: &str) -> Self {
        Self {
            short_url: outcome.code.to_url(base_url),
            short_code: outcome.code.to_string(),
            original_url: outcome.record.original_url.clone(),
            existing: outcome.was_existing,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BulkShortenRequest {
    pub urls: Vec<String>,
}

/// One entry of a bulk-shorten response: either a shortened URL or the
/// per-item failure that kept it out of the store.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BulkShortenItem {
    Shortened(ShortenResponse),
    Failed { original_url: String, error: String },
}

#[derive(Debug, Serialize)]
pub struct BulkShortenResponse {
    pub results: Vec<BulkShortenItem>,
    pub total_processed: usize,
    pub new_urls: usize,
    pub existing_urls: usize,
    pub errors: usize,
}

#[derive(Debug, Serialize)]
pub struct ListedUrl {
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub created_at: Timestamp,
    pub clicks: u64,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}
