//! HTTP settings for the content resolver

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default GitHub REST API base
pub const DEFAULT_GIST_API_BASE: &str = "https://api.github.com";

/// Settings for [`ContentResolver`](super::ContentResolver)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverSettings {
    /// Base of the gist metadata endpoint (`{base}/gists/{id}`)
    #[serde(default = "default_gist_api_base")]
    pub gist_api_base: String,
    /// User agent sent with every request (the GitHub API rejects requests without one)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_gist_api_base() -> String {
    DEFAULT_GIST_API_BASE.to_string()
}

fn default_user_agent() -> String {
    format!("mcp-gist/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            gist_api_base: default_gist_api_base(),
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }
}

impl ResolverSettings {
    /// Set the gist API base (used to point at a mirror or a test server)
    pub fn with_gist_api_base(mut self, base: impl Into<String>) -> Self {
        self.gist_api_base = base.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Metadata endpoint for a gist
    pub fn gist_endpoint(&self, id: &str) -> String {
        format!("{}/gists/{}", self.gist_api_base.trim_end_matches('/'), id)
    }
}
