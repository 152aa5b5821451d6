//! Node.js bindings for mcp-gist via napi-rs
//!
//! The editor extension creates one `McpGistExtension` on activation and wires
//! it to the host: `provideServerDefinitions` backs the server definition
//! provider, `getChildren` / `getTreeItem` back the tree view, and
//! `onDidChangeServerDefinitions` drives both refresh events.

#![deny(clippy::all)]

use std::collections::HashMap;
use std::sync::Arc;

use napi::bindgen_prelude::*;
use napi::threadsafe_function::{ThreadsafeFunction, ThreadsafeFunctionCallMode};
use napi_derive::napi;
use tokio::sync::broadcast::error::RecvError;

use mcp_gist_core::logging::file_logger;
use mcp_gist_core::resolver::gist_id;
use mcp_gist_core::{
    FileUrlStore as CoreFileUrlStore,
    Logger,
    McpGistService,
    MemoryUrlStore as CoreMemoryUrlStore,
    ResolverSettings,
    ServerDefinition as CoreServerDefinition,
    ServerRecord as CoreServerRecord,
    TreeIcon as CoreTreeIcon,
    TreeItem as CoreTreeItem,
    TreeLabels,
    TreeNode as CoreTreeNode,
    UrlStore,
};

fn to_napi_error(e: impl std::fmt::Display) -> Error {
    Error::from_reason(e.to_string())
}

fn logger() -> Arc<dyn Logger> {
    file_logger::global()
}

// ============================================================================
// Server Definition Types
// ============================================================================

#[napi(string_enum)]
pub enum ServerDefinitionKind {
    /// Reached over HTTP or SSE (`McpHttpServerDefinition`)
    Http,
    /// Spawned process over stdio (`McpStdioServerDefinition`)
    Stdio,
}

/// A validated server definition, flattened for JavaScript
#[napi(object)]
pub struct McpServerDefinition {
    pub kind: ServerDefinitionKind,
    pub label: String,
    pub version: Option<String>,
    /// `http` or `sse` (network servers)
    pub transport: Option<String>,
    pub uri: Option<String>,
    pub headers: Option<HashMap<String, String>>,
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
    pub env: Option<HashMap<String, String>>,
}

impl From<CoreServerDefinition> for McpServerDefinition {
    fn from(def: CoreServerDefinition) -> Self {
        match def {
            CoreServerDefinition::Network(net) => Self {
                kind: ServerDefinitionKind::Http,
                label: net.label,
                version: net.version,
                transport: Some(net.transport.to_string()),
                uri: Some(net.uri.to_string()),
                headers: Some(net.headers),
                command: None,
                args: None,
                env: None,
            },
            CoreServerDefinition::Process(process) => Self {
                kind: ServerDefinitionKind::Stdio,
                label: process.label,
                version: process.version,
                transport: None,
                uri: None,
                headers: None,
                command: Some(process.command),
                args: Some(process.args),
                env: Some(process.env),
            },
        }
    }
}

// ============================================================================
// Tree View Types
// ============================================================================

#[napi(string_enum)]
pub enum TreeNodeType {
    Url,
    Server,
    Message,
}

/// A node of the URL tree, as handed to and returned from the host
#[napi(object)]
pub struct TreeNode {
    pub node_type: TreeNodeType,
    pub label: String,
    /// Source URL (url nodes)
    pub url: Option<String>,
    /// Record `type` (server nodes)
    pub server_type: Option<String>,
    /// Record `label` as published (server nodes)
    pub server_label: Option<String>,
}

impl From<CoreTreeNode> for TreeNode {
    fn from(node: CoreTreeNode) -> Self {
        match node {
            CoreTreeNode::Url { url } => Self {
                node_type: TreeNodeType::Url,
                label: url.clone(),
                url: Some(url),
                server_type: None,
                server_label: None,
            },
            CoreTreeNode::Server { label, record } => Self {
                node_type: TreeNodeType::Server,
                label,
                url: None,
                server_type: record.server_type,
                server_label: record.label,
            },
            CoreTreeNode::Message { label } => Self {
                node_type: TreeNodeType::Message,
                label,
                url: None,
                server_type: None,
                server_label: None,
            },
        }
    }
}

impl From<TreeNode> for CoreTreeNode {
    fn from(node: TreeNode) -> Self {
        match node.node_type {
            TreeNodeType::Url => CoreTreeNode::Url {
                url: node.url.unwrap_or(node.label),
            },
            TreeNodeType::Server => CoreTreeNode::Server {
                label: node.label,
                record: CoreServerRecord {
                    label: node.server_label,
                    server_type: node.server_type,
                    ..Default::default()
                },
            },
            TreeNodeType::Message => CoreTreeNode::Message { label: node.label },
        }
    }
}

#[napi(object)]
pub struct TreeItem {
    pub label: String,
    pub tooltip: Option<String>,
    /// Theme icon id (`globe`, `server`, `info`)
    pub icon: String,
    /// `true` when the item starts collapsed and can be expanded
    pub collapsible: bool,
}

impl From<CoreTreeItem> for TreeItem {
    fn from(item: CoreTreeItem) -> Self {
        let icon: CoreTreeIcon = item.icon;
        Self {
            label: item.label,
            tooltip: item.tooltip,
            icon: icon.as_str().to_string(),
            collapsible: item.collapsible,
        }
    }
}

// ============================================================================
// McpGistExtension
// ============================================================================

/// Extension state for one activation
#[napi]
pub struct McpGistExtension {
    inner: Arc<McpGistService>,
    store_path: Option<String>,
}

impl McpGistExtension {
    fn build(
        store: Arc<dyn UrlStore>,
        settings: ResolverSettings,
        locale: Option<String>,
        store_path: Option<String>,
    ) -> Result<Self> {
        let labels = locale
            .as_deref()
            .map(TreeLabels::for_locale)
            .unwrap_or_default();
        let service = McpGistService::builder(store)
            .settings(settings)
            .labels(labels)
            .logger(logger())
            .build()
            .map_err(to_napi_error)?;

        Ok(Self {
            inner: Arc::new(service),
            store_path,
        })
    }

    fn from_file_store(store: CoreFileUrlStore, locale: Option<String>) -> Result<Self> {
        let settings = store.resolver_settings().map_err(to_napi_error)?;
        let path = store.path().to_string_lossy().to_string();
        logger().info(&format!("[napi] Using URL file {}", path));
        Self::build(Arc::new(store), settings, locale, Some(path))
    }
}

#[napi]
impl McpGistExtension {
    /// URLs stored in the user-level file (~/.config/mcp-gist/urls.yaml)
    #[napi(factory)]
    pub fn user(locale: Option<String>) -> Result<Self> {
        Self::from_file_store(CoreFileUrlStore::user(), locale)
    }

    /// URLs stored in the workspace-level file (.config/mcp-gist/urls.yaml)
    #[napi(factory)]
    pub fn workspace(workspace_root: String, locale: Option<String>) -> Result<Self> {
        Self::from_file_store(CoreFileUrlStore::workspace(workspace_root), locale)
    }

    /// URLs held in memory; the host persists them itself (e.g. `globalState`)
    #[napi(factory)]
    pub fn in_memory(urls: Vec<String>, locale: Option<String>) -> Result<Self> {
        let store = Arc::new(CoreMemoryUrlStore::with_urls(urls));
        Self::build(store, ResolverSettings::default(), locale, None)
    }

    /// Path of the backing URL file, if file-backed
    #[napi(getter)]
    pub fn store_path(&self) -> Option<String> {
        self.store_path.clone()
    }

    #[napi]
    pub async fn list_urls(&self) -> Result<Vec<String>> {
        self.inner.list_urls().await.map_err(to_napi_error)
    }

    #[napi]
    pub async fn add_url(&self, url: String) -> Result<()> {
        self.inner.add_url(&url).await.map_err(to_napi_error)
    }

    #[napi]
    pub async fn remove_url(&self, url: String) -> Result<()> {
        self.inner.remove_url(&url).await.map_err(to_napi_error)
    }

    /// Resolve every configured URL; rejects if any URL fails
    #[napi]
    pub async fn provide_server_definitions(&self) -> Result<Vec<McpServerDefinition>> {
        let definitions = self.inner.provide_definitions().await.map_err(|e| {
            logger().error(&format!("[napi] provideServerDefinitions failed: {}", e));
            to_napi_error(e)
        })?;
        Ok(definitions.into_iter().map(Into::into).collect())
    }

    /// Tree children of `node`, or the roots when omitted
    #[napi]
    pub async fn get_children(&self, node: Option<TreeNode>) -> Vec<TreeNode> {
        let node: Option<CoreTreeNode> = node.map(Into::into);
        self.inner
            .children(node.as_ref())
            .await
            .into_iter()
            .map(Into::into)
            .collect()
    }

    #[napi]
    pub fn get_tree_item(&self, node: TreeNode) -> TreeItem {
        self.inner.tree_item(&node.into()).into()
    }

    /// Drop cached documents and signal a change
    #[napi]
    pub fn refresh(&self) {
        self.inner.refresh();
    }

    /// Call `callback` whenever definitions may have changed
    #[napi]
    pub fn on_did_change_server_definitions(
        &self,
        #[napi(ts_arg_type = "(err: Error | null, generation: number) => void")]
        callback: ThreadsafeFunction<u32>,
    ) -> Result<()> {
        let mut changes = self.inner.subscribe();

        spawn(async move {
            let mut generation: u32 = 0;
            loop {
                match changes.recv().await {
                    Ok(()) | Err(RecvError::Lagged(_)) => {
                        generation = generation.wrapping_add(1);
                        let status = callback.call(Ok(generation), ThreadsafeFunctionCallMode::NonBlocking);
                        if status != Status::Ok {
                            logger().warn(&format!("[napi] change listener dropped: {:?}", status));
                            break;
                        }
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        Ok(())
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Gist identifier of a gist URL or bare id, if it is one
#[napi]
pub fn extract_gist_id(url: String) -> Option<String> {
    gist_id(url.trim()).map(|id| id.to_string())
}

/// Validate a definition document without fetching anything
#[napi]
pub fn validate_definitions(text: String, source: Option<String>) -> Result<Vec<McpServerDefinition>> {
    let source = source.unwrap_or_else(|| "inline".to_string());
    mcp_gist_core::validate(&text, &source)
        .map(|defs| defs.into_iter().map(Into::into).collect())
        .map_err(to_napi_error)
}

/// Path of the debug log file
#[napi]
pub fn get_log_file_path() -> String {
    file_logger::global().path().to_string_lossy().to_string()
}

/// Truncate the debug log file
#[napi]
pub fn clear_log() {
    file_logger::global().clear();
}
