//! URL store trait

use async_trait::async_trait;

/// Persisted list of source URLs
///
/// Implementations:
/// - `MemoryUrlStore`: In-memory, for testing and for hosts that persist state themselves
/// - `FileUrlStore`: YAML file (~/.config/mcp-gist/urls.yaml)
/// - VS Code adapter: seeds a `MemoryUrlStore` from `globalState`
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// All configured URLs, in insertion order (duplicates allowed)
    async fn list_urls(&self) -> StoreResult<Vec<String>>;

    /// Append a URL
    async fn add_url(&self, url: &str) -> StoreResult<()>;

    /// Remove every occurrence of a URL
    async fn remove_url(&self, url: &str) -> StoreResult<()>;
}

/// Errors that can occur during URL store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("URL must not be empty")]
    EmptyUrl,

    #[error("URL not found: {0}")]
    UrlNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Other(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Trim a URL for storage, rejecting blank input
pub(crate) fn normalize_url(url: &str) -> StoreResult<String> {
    let url = url.trim();
    if url.is_empty() {
        return Err(StoreError::EmptyUrl);
    }
    Ok(url.to_string())
}
