//! Session cache of parsed server records
//!
//! Entries never expire on their own. They live until [`ResolutionCache::invalidate`],
//! [`ResolutionCache::clear`], or the end of the process, so a document edited
//! remotely keeps showing its old records until a refresh.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::types::ServerRecord;

/// Mapping from source URL to the records last parsed from it
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: RwLock<HashMap<String, Vec<ServerRecord>>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached records for a URL
    pub fn get(&self, url: &str) -> Option<Vec<ServerRecord>> {
        self.entries.read().get(url).cloned()
    }

    /// Store records for a URL, replacing any previous entry
    pub fn insert(&self, url: impl Into<String>, records: Vec<ServerRecord>) {
        self.entries.write().insert(url.into(), records);
    }

    /// Drop the entry for a URL; returns whether one existed
    pub fn invalidate(&self, url: &str) -> bool {
        self.entries.write().remove(url).is_some()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.read().contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// URLs with a cached entry
    pub fn urls(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }
}
