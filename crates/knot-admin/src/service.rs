use crate::admin::Admin;
use async_trait::async_trait;
use knot_core::{Repository, ShortCode, UrlRecord};
use std::sync::Arc;
use tracing::debug;

/// Pass-through implementation of the [`Admin`] trait over a record
/// store.
#[derive(Debug, Clone)]
pub struct AdminService<R> {
    repository: Arc<R>,
}

impl<R: Repository> AdminService<R> {
    /// Creates a new `AdminService` with the given repository.
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }
}

#[async_trait]
impl<R: Repository> Admin for AdminService<R> {
    async fn stats(&self, code: &ShortCode) -> crate::Result<Option<UrlRecord>> {
        self.repository.get(code).await
    }

    async fn list(&self) -> crate::Result<Vec<(ShortCode, UrlRecord)>> {
        self.repository.list().await
    }

    async fn delete(&self, code: &ShortCode) -> crate::Result<bool> {
        let removed = self.repository.delete(code).await?;
        if removed {
            debug!(code = %code, "deleted short code");
        }
        Ok(removed)
    }
}
