use crate::redirector::Redirector;
use async_trait::async_trait;
use knot_core::{Repository, ShortCode};
use std::sync::Arc;
use tracing::{debug, trace};

/// Service for handling URL redirects.
///
/// Resolution and click counting are a single repository operation, so
/// a record deleted by a concurrent administrative call simply resolves
/// to `None` instead of surfacing an update error.
#[derive(Debug, Clone)]
pub struct RedirectorService<R> {
    repository: Arc<R>,
}

impl<R: Repository> RedirectorService<R> {
    /// Creates a new `RedirectorService` with the given repository.
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }
}

#[async_trait]
impl<R: Repository> Redirector for RedirectorService<R> {
    async fn resolve(&self, code: &ShortCode) -> crate::Result<Option<String>> {
        trace!(code = %code, "resolving short code");

        match self.repository.increment_clicks(code).await? {
            Some(record) => {
                debug!(code = %code, url = %record.original_url, clicks = record.clicks, "resolved short code");
                Ok(Some(record.original_url))
            }
            None => {
                trace!(code = %code, "short code not found");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knot_core::UrlRecord;
    use knot_storage::InMemoryRepository;

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    async fn setup_with_record(c: &ShortCode, url: &str) -> (InMemoryRepository, RedirectorService<InMemoryRepository>) {
        let repo = InMemoryRepository::new();
        repo.insert(c, UrlRecord::new(url)).await.unwrap();
        let service = RedirectorService::new(repo.clone());
        (repo, service)
    }

    #[tokio::test]
    async fn resolve_existing_code_counts_the_hit() {
        let c = code("abc123");
        let (repo, service) = setup_with_record(&c, "https://example.com").await;

        let url = service.resolve(&c).await.unwrap();
        assert_eq!(url.as_deref(), Some("https://example.com"));

        let record = repo.get(&c).await.unwrap().unwrap();
        assert_eq!(record.clicks, 1);
    }

    #[tokio::test]
    async fn repeated_resolutions_accumulate_clicks() {
        let c = code("abc123");
        let (repo, service) = setup_with_record(&c, "https://example.com").await;

        for _ in 0..5 {
            service.resolve(&c).await.unwrap();
        }

        let record = repo.get(&c).await.unwrap().unwrap();
        assert_eq!(record.clicks, 5);
    }

    #[tokio::test]
    async fn resolve_nonexistent_code() {
        let service = RedirectorService::new(InMemoryRepository::new());

        let url = service.resolve(&code("nope")).await.unwrap();
        assert!(url.is_none());
    }

    #[tokio::test]
    async fn resolve_after_delete_is_not_found() {
        let c = code("abc123");
        let (repo, service) = setup_with_record(&c, "https://example.com").await;

        assert!(repo.delete(&c).await.unwrap());

        let url = service.resolve(&c).await.unwrap();
        assert!(url.is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_resolutions_all_count() {
        let c = code("abc123");
        let (repo, service) = setup_with_record(&c, "https://example.com").await;

        let mut handles = vec![];
        for _ in 0..20 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service
                    .resolve(&ShortCode::new_unchecked("abc123"))
                    .await
                    .unwrap()
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_some());
        }

        let record = repo.get(&c).await.unwrap().unwrap();
        assert_eq!(record.clicks, 20);
    }
}
