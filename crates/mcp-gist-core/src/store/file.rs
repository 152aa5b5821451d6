//! File-based URL store (YAML)
//!
//! Supports user-level (~/.config/mcp-gist/urls.yaml) and workspace-level (.config/mcp-gist/urls.yaml) files.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::traits::{normalize_url, StoreError, StoreResult, UrlStore};
use crate::resolver::ResolverSettings;

/// URL file structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UrlsFile {
    /// Configured source URLs
    #[serde(default)]
    pub urls: Vec<String>,

    /// Resolver settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolver: Option<ResolverSettings>,
}

/// Store level (user or workspace)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreLevel {
    /// User-level file (~/.config/mcp-gist/urls.yaml)
    User,
    /// Workspace-level file (.config/mcp-gist/urls.yaml in workspace root)
    Workspace,
}

impl StoreLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreLevel::User => "user",
            StoreLevel::Workspace => "workspace",
        }
    }
}

/// File-based URL store
///
/// Reads and writes the URL list from a YAML file.
///
/// # Example
///
/// ```no_run
/// use mcp_gist_core::store::FileUrlStore;
///
/// // User-level store
/// let user_store = FileUrlStore::user();
///
/// // Workspace-level store
/// let workspace_store = FileUrlStore::workspace("/path/to/workspace");
/// ```
pub struct FileUrlStore {
    path: PathBuf,
    level: StoreLevel,
    cache: RwLock<Option<UrlsFile>>,
}

impl FileUrlStore {
    /// Create a new file store for a specific path
    pub fn new(path: impl Into<PathBuf>, level: StoreLevel) -> Self {
        Self {
            path: path.into(),
            level,
            cache: RwLock::new(None),
        }
    }

    /// Create a user-level store (~/.config/mcp-gist/urls.yaml)
    pub fn user() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        let path = config_dir.join("mcp-gist").join("urls.yaml");
        Self::new(path, StoreLevel::User)
    }

    /// Create a workspace-level store (.config/mcp-gist/urls.yaml)
    pub fn workspace(workspace_root: impl AsRef<Path>) -> Self {
        let path = workspace_root.as_ref().join(".config").join("mcp-gist").join("urls.yaml");
        Self::new(path, StoreLevel::Workspace)
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the store level
    pub fn level(&self) -> StoreLevel {
        self.level
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn load(&self) -> StoreResult<UrlsFile> {
        if !self.path.exists() {
            return Ok(UrlsFile::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(UrlsFile::default());
        }

        serde_yaml::from_str(&content)
            .map_err(|e| StoreError::Other(format!("Failed to parse YAML: {}", e)))
    }

    fn save(&self, file: &UrlsFile) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(file)
            .map_err(|e| StoreError::Other(format!("Failed to serialize YAML: {}", e)))?;

        fs::write(&self.path, content)?;
        *self.cache.write() = Some(file.clone());

        Ok(())
    }

    /// Get cached or load file
    fn get_file(&self) -> StoreResult<UrlsFile> {
        if let Some(file) = self.cache.read().as_ref() {
            return Ok(file.clone());
        }

        let file = self.load()?;
        *self.cache.write() = Some(file.clone());
        Ok(file)
    }

    /// Reload from disk (invalidate cache)
    pub fn reload(&self) -> StoreResult<UrlsFile> {
        let file = self.load()?;
        *self.cache.write() = Some(file.clone());
        Ok(file)
    }

    /// Resolver settings from the file, or defaults
    pub fn resolver_settings(&self) -> StoreResult<ResolverSettings> {
        Ok(self.get_file()?.resolver.unwrap_or_default())
    }

    pub fn set_resolver_settings(&self, settings: ResolverSettings) -> StoreResult<()> {
        let mut file = self.get_file()?;
        file.resolver = Some(settings);
        self.save(&file)
    }

    /// Create a backup of the current file
    pub fn backup(&self) -> StoreResult<Option<PathBuf>> {
        if !self.exists() {
            return Ok(None);
        }

        let backup_path = self.path.with_extension("yaml.backup");
        fs::copy(&self.path, &backup_path)?;
        Ok(Some(backup_path))
    }

    /// Export the URL list as a JSON array (for the editor's own state)
    pub fn export_json(&self) -> StoreResult<String> {
        let file = self.get_file()?;
        Ok(serde_json::to_string_pretty(&file.urls)?)
    }

    /// Import a JSON array of URLs, replacing the current list
    pub fn import_json(&self, json: &str) -> StoreResult<()> {
        let urls: Vec<String> = serde_json::from_str(json)?;
        let urls = urls
            .iter()
            .map(|u| normalize_url(u))
            .collect::<StoreResult<Vec<_>>>()?;

        let mut file = self.get_file()?;
        file.urls = urls;
        self.save(&file)
    }
}

impl std::fmt::Debug for FileUrlStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileUrlStore")
            .field("path", &self.path)
            .field("level", &self.level)
            .field("exists", &self.exists())
            .finish()
    }
}

#[async_trait]
impl UrlStore for FileUrlStore {
    async fn list_urls(&self) -> StoreResult<Vec<String>> {
        Ok(self.get_file()?.urls)
    }

    async fn add_url(&self, url: &str) -> StoreResult<()> {
        let url = normalize_url(url)?;
        let mut file = self.get_file()?;
        file.urls.push(url);
        self.save(&file)
    }

    async fn remove_url(&self, url: &str) -> StoreResult<()> {
        let mut file = self.get_file()?;

        let original_len = file.urls.len();
        file.urls.retain(|u| u != url);

        if file.urls.len() == original_len {
            Err(StoreError::UrlNotFound(url.to_string()))
        } else {
            self.save(&file)
        }
    }
}
