//! Tree view node types

use serde::{Deserialize, Serialize};

use super::server::ServerRecord;

/// A node of the URL browsing tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    /// A configured source URL (expandable)
    Url { url: String },
    /// A server record published at a URL
    Server { label: String, record: ServerRecord },
    /// Informational leaf (empty state or per-URL error)
    Message { label: String },
}

impl TreeNode {
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url { url: url.into() }
    }

    pub fn message(label: impl Into<String>) -> Self {
        Self::Message { label: label.into() }
    }

    /// Build a server node, using the record's display label
    pub fn server(record: ServerRecord) -> Self {
        Self::Server {
            label: record.display_label().to_string(),
            record,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Url { url } => url,
            Self::Server { label, .. } => label,
            Self::Message { label } => label,
        }
    }

    pub fn is_message(&self) -> bool {
        matches!(self, Self::Message { .. })
    }
}

/// Icon shown next to a tree item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeIcon {
    Globe,
    Server,
    Info,
}

impl TreeIcon {
    /// Theme icon id understood by the host
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Globe => "globe",
            Self::Server => "server",
            Self::Info => "info",
        }
    }
}

/// Presentation of a tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeItem {
    pub label: String,
    pub tooltip: Option<String>,
    pub icon: TreeIcon,
    /// Whether the node can be expanded (starts collapsed)
    pub collapsible: bool,
}
