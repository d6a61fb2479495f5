use async_trait::async_trait;
use knot_core::shortener::{ShortenOutcome, Shortener};
use knot_core::{Repository, ShortenerError, StorageError, UrlRecord};
use knot_generator::Generator;
use std::sync::Arc;
use tracing::{debug, warn};

/// How many candidate codes to try before giving up. At the default
/// alphabet and code length, hitting this is practically unreachable
/// short of a full code space.
const DEFAULT_MAX_ATTEMPTS: usize = 8;

/// A concrete implementation of the [`Shortener`] trait.
///
/// This service wraps a [`Repository`] and a [`Generator`] to handle:
/// - URL validation and whitespace normalization
/// - Deduplication: the exact same URL always maps to the same code
/// - Collision-free allocation via conflict-rejected inserts, with a
///   bounded retry budget
#[derive(Debug, Clone)]
pub struct ShortenerService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
    max_attempts: usize,
}

impl<R: Repository, G: Generator> ShortenerService<R, G> {
    /// Creates a new `ShortenerService`.
    pub fn new(repository: R, generator: G) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Overrides the collision retry budget.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Validates that the URL has an http/https scheme and a host.
    fn validate_url(url: &str) -> Result<(), ShortenerError> {
        if url.is_empty() {
            return Err(ShortenerError::InvalidUrl(
                "URL cannot be empty".to_string(),
            ));
        }

        let parts: Vec<&str> = url.split("://").collect();
        if parts.len() < 2 || parts[0].is_empty() || parts[1].is_empty() {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL must have a valid scheme and host: {}",
                url
            )));
        }

        let scheme = parts[0].to_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL scheme must be http or https: {}",
                scheme
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl<R: Repository, G: Generator> Shortener for ShortenerService<R, G> {
    async fn shorten(&self, url: &str) -> Result<ShortenOutcome, ShortenerError> {
        // Normalize before dedup comparison so inputs differing only in
        // surrounding whitespace share one record.
        let url = url.trim();
        Self::validate_url(url)?;

        if let Some((code, record)) = self.repository.find_by_url(url).await? {
            debug!(code = %code, "url already shortened, reusing code");
            return Ok(ShortenOutcome {
                code,
                record,
                was_existing: true,
            });
        }

        for attempt in 1..=self.max_attempts {
            let code = self.generator.generate();
            let record = UrlRecord::new(url);

            match self.repository.insert(&code, record.clone()).await {
                Ok(()) => {
                    debug!(code = %code, attempt, "allocated short code");
                    return Ok(ShortenOutcome {
                        code,
                        record,
                        was_existing: false,
                    });
                }
                Err(StorageError::Conflict(_)) => {
                    warn!(code = %code, attempt, "short code collision, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(ShortenerError::CodeSpaceExhausted(self.max_attempts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knot_core::ShortCode;
    use knot_generator::SeqGenerator;
    use knot_storage::InMemoryRepository;

    /// A generator that always returns the same code, for exercising
    /// the retry budget.
    struct FixedGenerator(ShortCode);

    impl Generator for FixedGenerator {
        fn generate(&self) -> ShortCode {
            self.0.clone()
        }
    }

    fn test_service() -> (
        InMemoryRepository,
        ShortenerService<InMemoryRepository, SeqGenerator>,
    ) {
        let repo = InMemoryRepository::new();
        let service = ShortenerService::new(repo.clone(), SeqGenerator::with_prefix("kn"));
        (repo, service)
    }

    #[tokio::test]
    async fn shorten_new_url() {
        let (_, service) = test_service();

        let outcome = service.shorten("https://example.com").await.unwrap();
        assert_eq!(outcome.code.as_str(), "kn000000");
        assert_eq!(outcome.record.original_url, "https://example.com");
        assert_eq!(outcome.record.clicks, 0);
        assert!(!outcome.was_existing);
    }

    #[tokio::test]
    async fn shorten_same_url_twice_reuses_code() {
        let (repo, service) = test_service();

        let first = service.shorten("https://example.com").await.unwrap();
        let second = service.shorten("https://example.com").await.unwrap();

        assert_eq!(first.code, second.code);
        assert!(!first.was_existing);
        assert!(second.was_existing);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn distinct_urls_get_distinct_codes() {
        let (_, service) = test_service();

        let a = service.shorten("https://example.com/a").await.unwrap();
        let b = service.shorten("https://example.com/b").await.unwrap();
        let c = service.shorten("https://example.com/c").await.unwrap();

        assert_ne!(a.code, b.code);
        assert_ne!(b.code, c.code);
        assert_ne!(a.code, c.code);
    }

    #[tokio::test]
    async fn surrounding_whitespace_is_normalized() {
        let (repo, service) = test_service();

        let first = service.shorten("  https://example.com\n").await.unwrap();
        let second = service.shorten("https://example.com").await.unwrap();

        assert_eq!(first.code, second.code);
        assert!(second.was_existing);
        assert_eq!(first.record.original_url, "https://example.com");
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn trailing_slash_is_a_different_url() {
        let (_, service) = test_service();

        let without = service.shorten("https://example.com").await.unwrap();
        let with = service.shorten("https://example.com/").await.unwrap();

        assert_ne!(without.code, with.code);
        assert!(!with.was_existing);
    }

    #[tokio::test]
    async fn invalid_urls_are_rejected_before_storage() {
        let (repo, service) = test_service();

        for input in ["", "   ", "not-a-valid-url", "ftp://example.com", "https://"] {
            let err = service.shorten(input).await.unwrap_err();
            assert!(matches!(err, ShortenerError::InvalidUrl(_)), "input: {input:?}");
        }

        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn collision_retries_with_fresh_code() {
        let repo = InMemoryRepository::new();
        // Occupy the first code the generator will produce.
        repo.insert(
            &ShortCode::new_unchecked("kn000000"),
            UrlRecord::new("https://taken.example"),
        )
        .await
        .unwrap();

        let service = ShortenerService::new(repo, SeqGenerator::with_prefix("kn"));
        let outcome = service.shorten("https://example.com").await.unwrap();

        assert_eq!(outcome.code.as_str(), "kn000001");
        assert!(!outcome.was_existing);
    }

    #[tokio::test]
    async fn exhausted_retry_budget_fails() {
        let repo = InMemoryRepository::new();
        repo.insert(
            &ShortCode::new_unchecked("stuck1"),
            UrlRecord::new("https://taken.example"),
        )
        .await
        .unwrap();

        let service = ShortenerService::new(
            repo,
            FixedGenerator(ShortCode::new_unchecked("stuck1")),
        )
        .with_max_attempts(3);

        let err = service.shorten("https://example.com").await.unwrap_err();
        assert!(matches!(err, ShortenerError::CodeSpaceExhausted(3)));
    }
}
