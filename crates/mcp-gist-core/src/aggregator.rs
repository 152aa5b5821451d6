//! Definition aggregation across source URLs
//!
//! All URLs are resolved concurrently. The first failure fails the whole
//! aggregation and drops the fetches still in flight: a host configuring live
//! server connections gets either every definition or an error, never a
//! silently partial list.

use std::sync::Arc;

use futures::future::try_join_all;

use crate::cache::ResolutionCache;
use crate::definitions::parse_records;
use crate::error::DefinitionResult;
use crate::logging::Logger;
use crate::resolver::ContentResolver;
use crate::types::{ServerDefinition, ServerRecord};

/// Resolves, validates and collects server definitions
pub struct DefinitionAggregator {
    resolver: ContentResolver,
    cache: Arc<ResolutionCache>,
    logger: Arc<dyn Logger>,
}

impl DefinitionAggregator {
    pub fn new(resolver: ContentResolver, cache: Arc<ResolutionCache>, logger: Arc<dyn Logger>) -> Self {
        Self {
            resolver,
            cache,
            logger,
        }
    }

    pub fn cache(&self) -> &Arc<ResolutionCache> {
        &self.cache
    }

    /// Resolve every URL and return all of their definitions
    ///
    /// Definitions of each URL keep their document order, and URLs contribute
    /// in the order given. Identical definitions from different URLs are kept.
    pub async fn aggregate(&self, urls: &[String]) -> DefinitionResult<Vec<ServerDefinition>> {
        self.logger.info(&format!("[Aggregator] Resolving {} source URL(s)", urls.len()));

        let per_url = try_join_all(urls.iter().map(|url| self.definitions_for(url)))
            .await
            .map_err(|e| {
                self.logger.error(&format!("[Aggregator] Aggregation failed: {}", e));
                e
            })?;

        let definitions: Vec<ServerDefinition> = per_url.into_iter().flatten().collect();
        self.logger.info(&format!("[Aggregator] Resolved {} server definition(s)", definitions.len()));
        Ok(definitions)
    }

    /// Resolve and validate a single URL
    pub async fn definitions_for(&self, url: &str) -> DefinitionResult<Vec<ServerDefinition>> {
        self.fetch_records(url)
            .await?
            .into_iter()
            .enumerate()
            .map(|(index, record)| ServerDefinition::from_record(record, url, index))
            .collect()
    }

    /// Fetch and parse a URL's records, refreshing its cache entry
    pub async fn fetch_records(&self, url: &str) -> DefinitionResult<Vec<ServerRecord>> {
        let text = self.resolver.resolve(url).await?;
        let records = parse_records(&text, url)?;

        self.logger.debug(&format!("[Aggregator] {} record(s) from {}", records.len(), url));
        self.cache.insert(url, records.clone());
        Ok(records)
    }

    /// Records for a URL, from the cache when present
    pub async fn cached_records(&self, url: &str) -> DefinitionResult<Vec<ServerRecord>> {
        if let Some(records) = self.cache.get(url) {
            return Ok(records);
        }
        self.fetch_records(url).await
    }
}

impl std::fmt::Debug for DefinitionAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefinitionAggregator")
            .field("resolver", &self.resolver)
            .field("cached_urls", &self.cache.len())
            .finish()
    }
}
