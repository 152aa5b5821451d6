//! Extension service
//!
//! Wires the URL store, aggregator, tree provider and change events together.
//! The host binding keeps one service per activation and forwards its provider
//! callback, tree view and add/remove commands here.
//!
//! ```rust,ignore
//! use mcp_gist_core::service::McpGistService;
//!
//! let service = McpGistService::builder(store).logger(logger).build()?;
//! service.add_url("https://gist.github.com/someuser/abc123").await?;
//!
//! // Host provider callback
//! let definitions = service.provide_definitions().await?;
//! ```

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::broadcast;

use crate::aggregator::DefinitionAggregator;
use crate::cache::ResolutionCache;
use crate::error::DefinitionError;
use crate::events::ChangeEmitter;
use crate::logging::{Logger, NoOpLogger};
use crate::resolver::{ContentResolver, ResolverSettings};
use crate::store::{StoreError, UrlStore};
use crate::tree::{TreeLabels, TreeProvider};
use crate::types::{ServerDefinition, TreeItem, TreeNode};

/// Errors surfaced by the service
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Builder for [`McpGistService`]
pub struct McpGistServiceBuilder {
    store: Arc<dyn UrlStore>,
    settings: ResolverSettings,
    labels: TreeLabels,
    logger: Arc<dyn Logger>,
}

impl McpGistServiceBuilder {
    pub fn settings(mut self, settings: ResolverSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn labels(mut self, labels: TreeLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn build(self) -> ServiceResult<McpGistService> {
        let resolver = ContentResolver::new(self.settings, self.logger.clone())?;
        let cache = Arc::new(ResolutionCache::new());
        let aggregator = Arc::new(DefinitionAggregator::new(resolver, cache, self.logger.clone()));
        let tree = TreeProvider::new(aggregator.clone(), self.labels, self.logger.clone());

        Ok(McpGistService {
            store: self.store,
            aggregator,
            tree,
            events: ChangeEmitter::new(),
            logger: self.logger,
        })
    }
}

/// The extension's state for one activation
pub struct McpGistService {
    store: Arc<dyn UrlStore>,
    aggregator: Arc<DefinitionAggregator>,
    tree: TreeProvider,
    events: ChangeEmitter,
    logger: Arc<dyn Logger>,
}

impl McpGistService {
    pub fn builder(store: Arc<dyn UrlStore>) -> McpGistServiceBuilder {
        McpGistServiceBuilder {
            store,
            settings: ResolverSettings::default(),
            labels: TreeLabels::default(),
            logger: Arc::new(NoOpLogger::new()),
        }
    }

    pub fn cache(&self) -> &Arc<ResolutionCache> {
        self.aggregator.cache()
    }

    /// Subscribe to "definitions changed" signals
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.events.subscribe()
    }

    pub async fn list_urls(&self) -> ServiceResult<Vec<String>> {
        Ok(self.store.list_urls().await?)
    }

    /// Resolve definitions for every configured URL (fail-fast)
    pub async fn provide_definitions(&self) -> ServiceResult<Vec<ServerDefinition>> {
        let urls = self.store.list_urls().await.map_err(|e| {
            self.logger.error(&format!("[McpGistService] Failed to read URLs: {}", e));
            e
        })?;
        Ok(self.aggregator.aggregate(&urls).await?)
    }

    /// Add a source URL and signal the change
    pub async fn add_url(&self, url: &str) -> ServiceResult<()> {
        self.store.add_url(url).await?;
        self.cache().invalidate(url.trim());
        self.logger.info(&format!("[McpGistService] URL added: {}", url.trim()));
        self.events.fire();
        Ok(())
    }

    /// Remove a source URL and signal the change
    pub async fn remove_url(&self, url: &str) -> ServiceResult<()> {
        self.store.remove_url(url).await?;
        self.cache().invalidate(url);
        self.logger.info(&format!("[McpGistService] URL removed: {}", url));
        self.events.fire();
        Ok(())
    }

    /// Drop every cached document and signal the change
    pub fn refresh(&self) {
        self.cache().clear();
        self.logger.info("[McpGistService] Cache cleared");
        self.events.fire();
    }

    /// Tree children for a node, or the roots when `node` is `None`
    ///
    /// An unreadable store shows as a single error message at the root.
    pub async fn children(&self, node: Option<&TreeNode>) -> Vec<TreeNode> {
        match (self.store.list_urls().await, node) {
            (Ok(urls), node) => self.tree.children(&urls, node).await,
            (Err(e), None) => {
                self.logger.warn(&format!("[McpGistService] Failed to read URLs: {}", e));
                vec![TreeNode::message(self.tree.labels().error(&e.to_string()))]
            }
            (Err(_), node) => self.tree.children(&[], node).await,
        }
    }

    pub fn tree_item(&self, node: &TreeNode) -> TreeItem {
        self.tree.tree_item(node)
    }
}

impl std::fmt::Debug for McpGistService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpGistService")
            .field("aggregator", &self.aggregator)
            .field("tree", &self.tree)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::store::{FileUrlStore, MemoryUrlStore, StoreLevel};
    use crate::types::ServerRecord;
    use serde_json::json;
    use tokio::sync::broadcast::error::TryRecvError;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(server: &MockServer, urls: Vec<String>) -> McpGistService {
        McpGistService::builder(Arc::new(MemoryUrlStore::with_urls(urls)))
            .settings(ResolverSettings::default().with_gist_api_base(server.uri()))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_add_remove_fire_events() {
        let server = MockServer::start().await;
        let service = service_for(&server, vec![]);
        let mut changes = service.subscribe();

        service.add_url("abc123").await.unwrap();
        assert!(changes.try_recv().is_ok());
        assert_eq!(service.list_urls().await.unwrap(), vec!["abc123"]);

        service.remove_url("abc123").await.unwrap();
        assert!(changes.try_recv().is_ok());
        assert!(service.list_urls().await.unwrap().is_empty());

        // Failed mutations do not signal
        assert!(matches!(
            service.remove_url("abc123").await,
            Err(ServiceError::Store(StoreError::UrlNotFound(_)))
        ));
        assert!(service.add_url("").await.is_err());
        assert!(matches!(changes.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_provide_definitions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gists/abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "files": {
                    "mcp.json": {
                        "truncated": false,
                        "content": "[{\"label\":\"remote\",\"type\":\"http\",\"uri\":\"https://x/y\"}]"
                    }
                }
            })))
            .mount(&server)
            .await;

        let service = service_for(&server, vec!["abc123".to_string()]);
        let defs = service.provide_definitions().await.unwrap();

        let ServerDefinition::Network(def) = &defs[0] else {
            panic!("expected network definition");
        };
        assert_eq!(def.uri.to_string(), "https://x/y");
    }

    #[tokio::test]
    async fn test_provide_definitions_surfaces_errors() {
        let server = MockServer::start().await;
        let service = service_for(&server, vec!["https://gist.github.com/".to_string()]);

        let err = service.provide_definitions().await.unwrap_err();
        let ServiceError::Definition(err) = err else {
            panic!("expected definition error");
        };
        assert_eq!(err.kind(), ErrorKind::Url);

        // The tree shows the same failure as a message node instead
        let node = TreeNode::url("https://gist.github.com/");
        let children = service.children(Some(&node)).await;
        assert!(children[0].is_message());
    }

    #[tokio::test]
    async fn test_refresh_clears_cache() {
        let server = MockServer::start().await;
        let service = service_for(&server, vec![]);
        let mut changes = service.subscribe();

        service.cache().insert("abc123", vec![ServerRecord::default()]);
        service.refresh();

        assert!(service.cache().is_empty());
        assert!(changes.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_remove_invalidates_cache_entry() {
        let server = MockServer::start().await;
        let service = service_for(&server, vec!["abc123".to_string(), "def456".to_string()]);

        service.cache().insert("abc123", vec![ServerRecord::default()]);
        service.cache().insert("def456", vec![ServerRecord::default()]);
        service.remove_url("abc123").await.unwrap();

        assert!(!service.cache().contains("abc123"));
        assert!(service.cache().contains("def456"));
        assert_eq!(service.children(None).await, vec![TreeNode::url("def456")]);
    }

    #[tokio::test]
    async fn test_unreadable_store_surfaces_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.yaml");
        std::fs::write(&path, "urls: [unclosed").unwrap();

        let service = McpGistService::builder(Arc::new(FileUrlStore::new(&path, StoreLevel::User)))
            .build()
            .unwrap();

        assert!(matches!(
            service.provide_definitions().await,
            Err(ServiceError::Store(StoreError::Other(_)))
        ));
        assert!(service.list_urls().await.is_err());

        let roots = service.children(None).await;
        assert_eq!(roots.len(), 1);
        let TreeNode::Message { label } = &roots[0] else {
            panic!("expected message node");
        };
        assert!(label.starts_with("Error: "));
        assert!(label.contains("Failed to parse YAML"));
    }
}
