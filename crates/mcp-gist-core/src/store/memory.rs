//! In-memory URL store

use async_trait::async_trait;
use parking_lot::RwLock;

use super::traits::{normalize_url, StoreError, StoreResult, UrlStore};

/// In-memory URL store
#[derive(Debug, Default)]
pub struct MemoryUrlStore {
    urls: RwLock<Vec<String>>,
}

impl MemoryUrlStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory store with initial URLs
    pub fn with_urls(urls: Vec<String>) -> Self {
        Self {
            urls: RwLock::new(urls),
        }
    }

    /// Replace the URL list (the host reloaded its own state)
    pub fn set_urls(&self, urls: Vec<String>) {
        *self.urls.write() = urls;
    }

    /// Clear all URLs
    pub fn clear(&self) {
        self.urls.write().clear();
    }
}

#[async_trait]
impl UrlStore for MemoryUrlStore {
    async fn list_urls(&self) -> StoreResult<Vec<String>> {
        Ok(self.urls.read().clone())
    }

    async fn add_url(&self, url: &str) -> StoreResult<()> {
        let url = normalize_url(url)?;
        self.urls.write().push(url);
        Ok(())
    }

    async fn remove_url(&self, url: &str) -> StoreResult<()> {
        let mut guard = self.urls.write();
        let original_len = guard.len();
        guard.retain(|u| u != url);

        if guard.len() == original_len {
            Err(StoreError::UrlNotFound(url.to_string()))
        } else {
            Ok(())
        }
    }
}
