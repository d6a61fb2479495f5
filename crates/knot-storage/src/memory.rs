use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use knot_core::repository::{Repository, Result, UrlRecord};
use knot_core::{ShortCode, StorageError};
use std::sync::Arc;

/// In-memory implementation of the [`Repository`] trait using DashMap.
///
/// DashMap's sharded locks allow concurrent reads and writes to
/// different buckets without blocking, and its entry API decides
/// conflicting inserts of the same code atomically.
///
/// Cloning is cheap and shares the underlying map, so one store
/// instance can back every service in the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<DashMap<String, UrlRecord>>,
}

impl InMemoryRepository {
    /// Creates a new, empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, code: &ShortCode, record: UrlRecord) -> Result<()> {
        match self.storage.entry(code.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(code.to_string())),
            Entry::Vacant(vacant) => {
                vacant.insert(record);
                Ok(())
            }
        }
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        Ok(self
            .storage
            .get(code.as_str())
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<(ShortCode, UrlRecord)>> {
        let found = self
            .storage
            .iter()
            .filter(|entry| entry.value().original_url == url)
            .min_by_key(|entry| entry.value().created_at)
            .map(|entry| {
                (
                    ShortCode::new_unchecked(entry.key().clone()),
                    entry.value().clone(),
                )
            });
        Ok(found)
    }

    async fn increment_clicks(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        let Some(mut entry) = self.storage.get_mut(code.as_str()) else {
            return Ok(None);
        };
        entry.clicks += 1;
        Ok(Some(entry.value().clone()))
    }

    async fn delete(&self, code: &ShortCode) -> Result<bool> {
        Ok(self.storage.remove(code.as_str()).is_some())
    }

    async fn list(&self) -> Result<Vec<(ShortCode, UrlRecord)>> {
        let mut records: Vec<(ShortCode, UrlRecord)> = self
            .storage
            .iter()
            .map(|entry| {
                (
                    ShortCode::new_unchecked(entry.key().clone()),
                    entry.value().clone(),
                )
            })
            .collect();
        records.sort_by(|(a_code, a), (b_code, b)| {
            (a.created_at, a_code.as_str()).cmp(&(b.created_at, b_code.as_str()))
        });
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    fn record(url: &str) -> UrlRecord {
        UrlRecord::new(url)
    }

    fn record_at(url: &str, second: i64) -> UrlRecord {
        UrlRecord {
            original_url: url.to_string(),
            created_at: Timestamp::from_second(second).unwrap(),
            clicks: 0,
        }
    }

    #[tokio::test]
    async fn save_and_get() {
        let repo = InMemoryRepository::new();

        repo.insert(&code("abc123"), record("https://example.com"))
            .await
            .unwrap();

        let result = repo.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(result.original_url, "https://example.com");
        assert_eq!(result.clicks, 0);
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let repo = InMemoryRepository::new();

        let result = repo.get(&code("nope")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn insert_conflict() {
        let repo = InMemoryRepository::new();

        repo.insert(&code("abc123"), record("https://example.com"))
            .await
            .unwrap();

        let err = repo
            .insert(&code("abc123"), record("https://other.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Conflict(_)));
    }

    #[tokio::test]
    async fn find_by_url_exact_match() {
        let repo = InMemoryRepository::new();

        repo.insert(&code("abc123"), record("https://example.com"))
            .await
            .unwrap();

        let (found_code, found) = repo
            .find_by_url("https://example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found_code, code("abc123"));
        assert_eq!(found.original_url, "https://example.com");

        // No normalization: trailing slash is a different URL.
        assert!(repo
            .find_by_url("https://example.com/")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn find_by_url_earliest_created_wins() {
        let repo = InMemoryRepository::new();

        repo.insert(&code("newer"), record_at("https://example.com", 2_000))
            .await
            .unwrap();
        repo.insert(&code("older"), record_at("https://example.com", 1_000))
            .await
            .unwrap();

        let (found_code, _) = repo
            .find_by_url("https://example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found_code, code("older"));
    }

    #[tokio::test]
    async fn increment_clicks_returns_updated_record() {
        let repo = InMemoryRepository::new();

        repo.insert(&code("abc123"), record("https://example.com"))
            .await
            .unwrap();

        let updated = repo.increment_clicks(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(updated.clicks, 1);

        let updated = repo.increment_clicks(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(updated.clicks, 2);
    }

    #[tokio::test]
    async fn increment_clicks_nonexistent() {
        let repo = InMemoryRepository::new();

        let result = repo.increment_clicks(&code("nope")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_existing() {
        let repo = InMemoryRepository::new();

        repo.insert(&code("abc123"), record("https://example.com"))
            .await
            .unwrap();

        assert!(repo.delete(&code("abc123")).await.unwrap());
        assert!(repo.get(&code("abc123")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_nonexistent() {
        let repo = InMemoryRepository::new();

        assert!(!repo.delete(&code("nope")).await.unwrap());
    }

    #[tokio::test]
    async fn list_in_creation_order() {
        let repo = InMemoryRepository::new();

        repo.insert(&code("ccc"), record_at("https://c.example", 3_000))
            .await
            .unwrap();
        repo.insert(&code("aaa"), record_at("https://a.example", 1_000))
            .await
            .unwrap();
        repo.insert(&code("bbb"), record_at("https://b.example", 2_000))
            .await
            .unwrap();

        let listed = repo.list().await.unwrap();
        let codes: Vec<&str> = listed.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(codes, vec!["aaa", "bbb", "ccc"]);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let repo = InMemoryRepository::new();
        let other = repo.clone();

        repo.insert(&code("abc123"), record("https://example.com"))
            .await
            .unwrap();

        assert!(other.get(&code("abc123")).await.unwrap().is_some());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_inserts_of_same_code_yield_one_winner() {
        let repo = InMemoryRepository::new();
        let mut handles = vec![];

        for i in 0..8 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.insert(
                    &ShortCode::new_unchecked("same"),
                    UrlRecord::new(format!("https://example{}.com", i)),
                )
                .await
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_increments_are_not_lost() {
        let repo = InMemoryRepository::new();
        repo.insert(&code("abc123"), record("https://example.com"))
            .await
            .unwrap();

        let mut handles = vec![];
        for _ in 0..50 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.increment_clicks(&ShortCode::new_unchecked("abc123"))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let result = repo.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(result.clicks, 50);
    }
}
