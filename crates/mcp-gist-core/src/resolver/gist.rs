//! Gist reference detection

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{DefinitionError, DefinitionResult};

/// `gist.github.com/<id>` or `gist.github.com/<owner>/<id>`
static GIST_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"gist\.github\.com/(?:[^/]+/)?([a-zA-Z0-9]+)").expect("valid gist url pattern")
});

/// A bare gist identifier
static GIST_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-zA-Z0-9]+)$").expect("valid gist id pattern"));

const GIST_HOST: &str = "gist.github.com";

/// How a source URL is fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRef {
    /// A gist, addressed by identifier
    Gist(String),
    /// Any other absolute URL
    Direct(url::Url),
}

impl SourceRef {
    /// Classify a source URL without touching the network
    ///
    /// Fails when the URL names the gist host but carries no identifier, or
    /// when a non-gist URL is not an absolute URL.
    pub fn parse(source: &str) -> DefinitionResult<Self> {
        let source = source.trim();

        if let Some(id) = gist_id(source) {
            return Ok(Self::Gist(id.to_string()));
        }

        if source.contains(GIST_HOST) {
            return Err(DefinitionError::invalid_url(source, "no gist identifier found"));
        }

        url::Url::parse(source)
            .map(Self::Direct)
            .map_err(|e| DefinitionError::invalid_url(source, e.to_string()))
    }

    pub fn is_gist(&self) -> bool {
        matches!(self, Self::Gist(_))
    }
}

/// Extract the gist identifier from a gist URL or a bare identifier
pub fn gist_id(source: &str) -> Option<&str> {
    GIST_URL
        .captures(source)
        .or_else(|| GIST_ID.captures(source))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
