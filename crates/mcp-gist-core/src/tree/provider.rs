//! Tree view data provider

use std::sync::Arc;

use super::labels::TreeLabels;
use crate::aggregator::DefinitionAggregator;
use crate::logging::Logger;
use crate::types::{TreeIcon, TreeItem, TreeNode};

/// Supplies nodes for the URL browsing tree
///
/// Unlike aggregation, a failing URL never fails the tree: its error is shown
/// as a single message node under that URL.
pub struct TreeProvider {
    aggregator: Arc<DefinitionAggregator>,
    labels: TreeLabels,
    logger: Arc<dyn Logger>,
}

impl TreeProvider {
    pub fn new(aggregator: Arc<DefinitionAggregator>, labels: TreeLabels, logger: Arc<dyn Logger>) -> Self {
        Self {
            aggregator,
            labels,
            logger,
        }
    }

    pub fn labels(&self) -> &TreeLabels {
        &self.labels
    }

    /// Children of a node, or the roots when `node` is `None`
    pub async fn children(&self, urls: &[String], node: Option<&TreeNode>) -> Vec<TreeNode> {
        match node {
            None if urls.is_empty() => vec![TreeNode::message(&self.labels.no_urls)],
            None => urls.iter().map(TreeNode::url).collect(),
            Some(TreeNode::Url { url }) => self.server_nodes(url).await,
            Some(_) => Vec::new(),
        }
    }

    async fn server_nodes(&self, url: &str) -> Vec<TreeNode> {
        match self.aggregator.cached_records(url).await {
            Ok(records) => records.into_iter().map(TreeNode::server).collect(),
            Err(e) => {
                self.logger.warn(&format!("[TreeProvider] Failed to load {}: {}", url, e));
                vec![TreeNode::message(self.labels.error(&e.to_string()))]
            }
        }
    }

    /// Presentation of a node
    pub fn tree_item(&self, node: &TreeNode) -> TreeItem {
        match node {
            TreeNode::Url { url } => TreeItem {
                label: url.clone(),
                tooltip: Some(url.clone()),
                icon: TreeIcon::Globe,
                collapsible: true,
            },
            TreeNode::Server { label, record } => {
                let unknown = self.labels.unknown.as_str();
                let or_unknown = |value: Option<&str>| {
                    value.filter(|v| !v.trim().is_empty()).unwrap_or(unknown).to_string()
                };
                TreeItem {
                    label: label.clone(),
                    tooltip: Some(format!(
                        "Type: {}\nLabel: {}",
                        or_unknown(record.server_type.as_deref()),
                        or_unknown(record.label.as_deref())
                    )),
                    icon: TreeIcon::Server,
                    collapsible: false,
                }
            }
            TreeNode::Message { label } => TreeItem {
                label: label.clone(),
                tooltip: None,
                icon: TreeIcon::Info,
                collapsible: false,
            },
        }
    }
}

impl std::fmt::Debug for TreeProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeProvider")
            .field("labels", &self.labels)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ResolutionCache;
    use crate::logging::NoOpLogger;
    use crate::resolver::{ContentResolver, ResolverSettings};
    use crate::types::ServerRecord;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer, labels: TreeLabels) -> TreeProvider {
        let logger: Arc<dyn Logger> = Arc::new(NoOpLogger::new());
        let settings = ResolverSettings::default().with_gist_api_base(server.uri());
        let resolver = ContentResolver::new(settings, logger.clone()).unwrap();
        let aggregator = DefinitionAggregator::new(resolver, Arc::new(ResolutionCache::new()), logger.clone());
        TreeProvider::new(Arc::new(aggregator), labels, logger)
    }

    #[tokio::test]
    async fn test_roots() {
        let server = MockServer::start().await;
        let provider = provider_for(&server, TreeLabels::english());

        let empty = provider.children(&[], None).await;
        assert_eq!(empty, vec![TreeNode::message("No MCP URLs configured")]);

        let urls = vec!["abc123".to_string(), "https://example.com/a.json".to_string()];
        let roots = provider.children(&urls, None).await;
        assert_eq!(roots, vec![TreeNode::url("abc123"), TreeNode::url("https://example.com/a.json")]);
    }

    #[tokio::test]
    async fn test_url_children_use_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/servers.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "label": "fs", "command": "npx" },
                { "type": "http", "uri": "https://example.com/mcp" }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server, TreeLabels::english());
        let url = format!("{}/servers.json", server.uri());
        let node = TreeNode::url(&url);

        let children = provider.children(&[url.clone()], Some(&node)).await;
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].label(), "fs");
        assert_eq!(children[1].label(), "Unknown Server");

        // Second expansion is served from the cache
        let again = provider.children(&[url], Some(&node)).await;
        assert_eq!(again, children);
    }

    #[tokio::test]
    async fn test_url_error_is_contained() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let provider = provider_for(&server, TreeLabels::japanese());
        let node = TreeNode::url(format!("{}/missing.json", server.uri()));

        let children = provider.children(&[], Some(&node)).await;
        assert_eq!(children.len(), 1);
        assert!(children[0].is_message());
        assert!(children[0].label().starts_with("エラー: "));
        assert!(children[0].label().contains("404"));
    }

    #[tokio::test]
    async fn test_leaf_children_empty() {
        let server = MockServer::start().await;
        let provider = provider_for(&server, TreeLabels::english());

        let leaf = TreeNode::message("info");
        assert!(provider.children(&[], Some(&leaf)).await.is_empty());

        let server_node = TreeNode::server(ServerRecord::default());
        assert!(provider.children(&[], Some(&server_node)).await.is_empty());
    }

    #[tokio::test]
    async fn test_tree_items() {
        let server = MockServer::start().await;
        let provider = provider_for(&server, TreeLabels::english());

        let item = provider.tree_item(&TreeNode::url("abc123"));
        assert_eq!(item.icon, TreeIcon::Globe);
        assert_eq!(item.tooltip.as_deref(), Some("abc123"));
        assert!(item.collapsible);

        let record = ServerRecord {
            label: Some("remote".to_string()),
            server_type: Some("sse".to_string()),
            ..Default::default()
        };
        let item = provider.tree_item(&TreeNode::server(record));
        assert_eq!(item.icon, TreeIcon::Server);
        assert_eq!(item.tooltip.as_deref(), Some("Type: sse\nLabel: remote"));
        assert!(!item.collapsible);

        let item = provider.tree_item(&TreeNode::server(ServerRecord::default()));
        assert_eq!(item.label, "Unknown Server");
        assert_eq!(item.tooltip.as_deref(), Some("Type: unknown\nLabel: unknown"));

        let item = provider.tree_item(&TreeNode::message("hello"));
        assert_eq!(item.icon, TreeIcon::Info);
        assert!(item.tooltip.is_none());
    }

    #[tokio::test]
    async fn test_blank_label_tooltip() {
        let server = MockServer::start().await;
        let provider = provider_for(&server, TreeLabels::english());

        let record = ServerRecord {
            label: Some(String::new()),
            server_type: Some("http".to_string()),
            ..Default::default()
        };
        let item = provider.tree_item(&TreeNode::server(record));
        assert_eq!(item.label, "Unknown Server");
        assert_eq!(item.tooltip.as_deref(), Some("Type: http\nLabel: unknown"));
    }
}
