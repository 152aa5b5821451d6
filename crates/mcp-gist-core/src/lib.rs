//! mcp-gist Core
//!
//! Runtime-agnostic resolution of remote MCP server definitions.
//! This crate provides the core functionality behind the editor extension
//! (loaded from Node.js via napi-rs) and can be used from any tokio runtime.
//!
//! ## Pipeline
//!
//! ```text
//! source URL ──► ContentResolver ──► raw JSON ──► definitions::validate ──► ServerDefinition
//!   (gist id,      (gist metadata,                 (array check,            (Network | Process)
//!    gist URL,      truncated raw_url,              variant mapping)
//!    direct URL)    direct GET)
//! ```
//!
//! `DefinitionAggregator` runs the pipeline for many URLs concurrently and
//! fails fast; `TreeProvider` runs it per URL for display and contains errors
//! per node.
//!
//! ```rust,ignore
//! use mcp_gist_core::{McpGistService, MemoryUrlStore};
//!
//! let store = Arc::new(MemoryUrlStore::with_urls(vec!["abc123".into()]));
//! let service = McpGistService::builder(store).build()?;
//!
//! let definitions = service.provide_definitions().await?;
//! let roots = service.children(None).await;
//! ```

pub mod types;
pub mod error;
pub mod logging;
pub mod store;
pub mod resolver;
pub mod definitions;
pub mod cache;
pub mod aggregator;
pub mod tree;
pub mod events;
pub mod service;

// Re-export commonly used types
pub use types::{
    NetworkDefinition, NetworkTransport, ProcessDefinition, ServerDefinition, ServerRecord,
    TreeIcon, TreeItem, TreeNode, UNKNOWN_SERVER_LABEL,
};

pub use error::{DefinitionError, DefinitionResult, ErrorKind};

pub use logging::{Logger, LogLevel, NoOpLogger, ConsoleLogger, FileLogger};

pub use store::{UrlStore, StoreError, StoreResult, MemoryUrlStore, FileUrlStore, StoreLevel};

pub use resolver::{ContentResolver, ResolverSettings, SourceRef};

pub use definitions::{parse_records, validate};

pub use cache::ResolutionCache;

pub use aggregator::DefinitionAggregator;

pub use tree::{TreeLabels, TreeProvider};

pub use events::ChangeEmitter;

pub use service::{McpGistService, McpGistServiceBuilder, ServiceError, ServiceResult};
