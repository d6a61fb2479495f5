use async_trait::async_trait;
use knot_core::repository::{Repository, Result, UrlRecord};
use knot_core::{ShortCode, StorageError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Durable [`Repository`] backed by a single JSON file.
///
/// The authoritative state is an in-memory map guarded by one writer
/// lock. Every mutation, while still holding the write guard, rewrites
/// the full state to a sibling temp file, flushes it, and renames it
/// over the live file, so a crash mid-write leaves the previous valid
/// file in place. When the persist step fails the in-memory mutation is
/// rolled back, keeping memory and disk in agreement.
///
/// Cloning is cheap and shares the underlying store, so one instance
/// can back every service in the process.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    path: PathBuf,
    tmp_path: PathBuf,
    records: RwLock<HashMap<String, UrlRecord>>,
}

impl JsonFileRepository {
    /// Opens the store at `path`, loading any previously persisted
    /// state. A missing file starts an empty store; an unparseable file
    /// is rejected with `InvalidData` rather than silently discarded.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let records: HashMap<String, UrlRecord> = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                StorageError::InvalidData(format!("{}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(StorageError::Persistence(e.to_string())),
        };

        debug!(path = %path.display(), records = records.len(), "opened url store");

        let mut tmp_path = path.clone().into_os_string();
        tmp_path.push(".tmp");

        Ok(Self {
            inner: Arc::new(Inner {
                path,
                tmp_path: PathBuf::from(tmp_path),
                records: RwLock::new(records),
            }),
        })
    }

    /// Returns the path of the backing data file.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Writes the full state to the temp file and renames it over the
    /// live file. Callers must hold the write guard for the duration.
    async fn persist(&self, records: &HashMap<String, UrlRecord>) -> Result<()> {
        let bytes =
            serde_json::to_vec_pretty(records).map_err(|e| StorageError::Persistence(e.to_string()))?;

        let mut file = fs::File::create(&self.inner.tmp_path)
            .await
            .map_err(persistence)?;
        file.write_all(&bytes).await.map_err(persistence)?;
        file.sync_all().await.map_err(persistence)?;
        drop(file);

        fs::rename(&self.inner.tmp_path, &self.inner.path)
            .await
            .map_err(persistence)
    }
}

fn persistence(e: std::io::Error) -> StorageError {
    StorageError::Persistence(e.to_string())
}

#[async_trait]
impl Repository for JsonFileRepository {
    async fn insert(&self, code: &ShortCode, record: UrlRecord) -> Result<()> {
        let mut records = self.inner.records.write().await;

        if records.contains_key(code.as_str()) {
            return Err(StorageError::Conflict(code.to_string()));
        }
        records.insert(code.as_str().to_owned(), record);

        if let Err(err) = self.persist(&records).await {
            records.remove(code.as_str());
            warn!(code = %code, error = %err, "rolled back insert after failed persist");
            return Err(err);
        }
        Ok(())
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        let records = self.inner.records.read().await;
        Ok(records.get(code.as_str()).cloned())
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<(ShortCode, UrlRecord)>> {
        let records = self.inner.records.read().await;
        let found = records
            .iter()
            .filter(|(_, record)| record.original_url == url)
            .min_by_key(|(code, record)| (record.created_at, code.as_str()))
            .map(|(code, record)| (ShortCode::new_unchecked(code.clone()), record.clone()));
        Ok(found)
    }

    async fn increment_clicks(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        let mut records = self.inner.records.write().await;

        let updated = {
            let Some(record) = records.get_mut(code.as_str()) else {
                return Ok(None);
            };
            record.clicks += 1;
            record.clone()
        };

        if let Err(err) = self.persist(&records).await {
            if let Some(record) = records.get_mut(code.as_str()) {
                record.clicks -= 1;
            }
            warn!(code = %code, error = %err, "rolled back click increment after failed persist");
            return Err(err);
        }
        Ok(Some(updated))
    }

    async fn delete(&self, code: &ShortCode) -> Result<bool> {
        let mut records = self.inner.records.write().await;

        let Some(previous) = records.remove(code.as_str()) else {
            return Ok(false);
        };

        if let Err(err) = self.persist(&records).await {
            records.insert(code.as_str().to_owned(), previous);
            warn!(code = %code, error = %err, "rolled back delete after failed persist");
            return Err(err);
        }
        Ok(true)
    }

    async fn list(&self) -> Result<Vec<(ShortCode, UrlRecord)>> {
        let records = self.inner.records.read().await;
        let mut listed: Vec<(ShortCode, UrlRecord)> = records
            .iter()
            .map(|(code, record)| (ShortCode::new_unchecked(code.clone()), record.clone()))
            .collect();
        listed.sort_by(|(a_code, a), (b_code, b)| {
            (a.created_at, a_code.as_str()).cmp(&(b.created_at, b_code.as_str()))
        });
        Ok(listed)
    }
}
