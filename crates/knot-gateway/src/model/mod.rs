pub mod health;
pub mod url;

pub use health::HealthResponse;
pub use url::{
    BulkShortenItem, BulkShortenRequest, BulkShortenResponse, DeleteResponse, ListedUrl,
    ShortenRequest, ShortenResponse,
};
