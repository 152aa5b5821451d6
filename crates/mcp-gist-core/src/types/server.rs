//! Server record and server definition types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use url::Url;

/// Label used when a record has no usable `label`
pub const UNKNOWN_SERVER_LABEL: &str = "Unknown Server";

/// One entry of a remote server definition document, as published
///
/// Every field is optional here; [`ServerDefinition`] is the validated form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerRecord {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// `"http"`, `"sse"`, or anything else for a spawned process
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub server_type: Option<String>,
    /// Endpoint of a network server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Request headers for a network server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    /// Executable of a process server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Arguments of a process server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    /// Environment of a process server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ServerRecord {
    /// Label to display, falling back to [`UNKNOWN_SERVER_LABEL`]
    pub fn display_label(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.trim().is_empty() => label,
            _ => UNKNOWN_SERVER_LABEL,
        }
    }

    /// Network transport named by `type`, if any
    pub fn transport(&self) -> Option<NetworkTransport> {
        self.server_type.as_deref().and_then(NetworkTransport::from_type)
    }
}

/// Transport of a network server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkTransport {
    Http,
    Sse,
}

impl NetworkTransport {
    /// Match a record's `type` value
    pub fn from_type(value: &str) -> Option<Self> {
        match value {
            "http" => Some(Self::Http),
            "sse" => Some(Self::Sse),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Sse => "sse",
        }
    }
}

impl std::fmt::Display for NetworkTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A server reached over HTTP or SSE
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkDefinition {
    pub label: String,
    pub uri: Url,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub transport: NetworkTransport,
}

/// A server spawned as a local process speaking over stdio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessDefinition {
    pub label: String,
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub env: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ProcessDefinition {
    /// Create a new process server definition
    pub fn new(label: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            command: command.into(),
            args: Vec::new(),
            env: HashMap::new(),
            version: None,
        }
    }

    /// Set the arguments
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

}

/// A validated server definition handed to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ServerDefinition {
    Network(NetworkDefinition),
    Process(ProcessDefinition),
}

impl ServerDefinition {
    pub fn label(&self) -> &str {
        match self {
            Self::Network(def) => &def.label,
            Self::Process(def) => &def.label,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<NetworkDefinition> for ServerDefinition {
    fn from(def: NetworkDefinition) -> Self {
        Self::Network(def)
    }
}

impl From<ProcessDefinition> for ServerDefinition {
    fn from(def: ProcessDefinition) -> Self {
        Self::Process(def)
    }
}
