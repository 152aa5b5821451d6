//! Content resolver
//!
//! Fetches the raw text of a definition document. Gists are read through the
//! metadata endpoint; everything else is a plain GET.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;

use super::gist::SourceRef;
use super::settings::ResolverSettings;
use crate::error::{DefinitionError, DefinitionResult};
use crate::logging::Logger;

/// Gist metadata, reduced to the fields we read
#[derive(Debug, Deserialize)]
struct GistMetadata {
    #[serde(default)]
    files: BTreeMap<String, GistFile>,
}

#[derive(Debug, Deserialize)]
struct GistFile {
    #[serde(default)]
    truncated: bool,
    #[serde(default)]
    raw_url: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

/// Resolves source URLs to raw document text
pub struct ContentResolver {
    client: reqwest::Client,
    settings: ResolverSettings,
    logger: Arc<dyn Logger>,
}

impl ContentResolver {
    /// Create a resolver with its own HTTP client
    pub fn new(settings: ResolverSettings, logger: Arc<dyn Logger>) -> DefinitionResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(settings.user_agent.clone());
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(DefinitionError::Client)?;

        Ok(Self::with_client(client, settings, logger))
    }

    /// Create a resolver around an existing HTTP client
    pub fn with_client(
        client: reqwest::Client,
        settings: ResolverSettings,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            client,
            settings,
            logger,
        }
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Fetch the raw text behind a source URL
    pub async fn resolve(&self, source: &str) -> DefinitionResult<String> {
        match SourceRef::parse(source)? {
            SourceRef::Gist(id) => self.resolve_gist(&id).await,
            SourceRef::Direct(url) => {
                self.logger.debug(&format!("[ContentResolver] Fetching {}", url));
                self.get_text(url.as_str()).await
            }
        }
    }

    async fn resolve_gist(&self, id: &str) -> DefinitionResult<String> {
        let endpoint = self.settings.gist_endpoint(id);
        self.logger.debug(&format!("[ContentResolver] Fetching gist {} from {}", id, endpoint));

        let response = self.get(&endpoint).await?;
        let metadata: GistMetadata = response
            .json()
            .await
            .map_err(|e| DefinitionError::network(&endpoint, e))?;

        // First file by name; the API's own ordering is not relied upon.
        let (name, file) = metadata
            .files
            .into_iter()
            .next()
            .ok_or_else(|| DefinitionError::EmptyGist { id: id.to_string() })?;

        if file.truncated {
            let raw_url = file.raw_url.ok_or_else(|| {
                DefinitionError::malformed_gist(id, format!("truncated file '{}' has no raw_url", name))
            })?;
            self.logger.debug(&format!(
                "[ContentResolver] Gist {} file '{}' is truncated, fetching {}",
                id, name, raw_url
            ));
            return self.get_text(&raw_url).await;
        }

        file.content.ok_or_else(|| {
            DefinitionError::malformed_gist(id, format!("file '{}' has no content", name))
        })
    }

    async fn get(&self, url: &str) -> DefinitionResult<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| {
                self.logger.error(&format!("[ContentResolver] Request to {} failed: {}", url, e));
                DefinitionError::network(url, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            self.logger.warn(&format!("[ContentResolver] {} returned {}", url, status));
            return Err(DefinitionError::status(url, status));
        }

        Ok(response)
    }

    async fn get_text(&self, url: &str) -> DefinitionResult<String> {
        self.get(url)
            .await?
            .text()
            .await
            .map_err(|e| DefinitionError::network(url, e))
    }
}

impl std::fmt::Debug for ContentResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentResolver")
            .field("settings", &self.settings)
            .finish()
    }
}
