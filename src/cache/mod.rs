//! In-memory cache for list-query results.
//!
//! The cache is owned by the transport layer (`api::Client`). Tables only read
//! through it and request invalidation after a mutation; they never write to
//! it directly. Features include:
//! - Per-operation keys (operation name + canonical variables)
//! - Optional TTL
//! - Size limit with oldest-first eviction

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

/// Default maximum number of cached query results.
pub const DEFAULT_MAX_ENTRIES: usize = 64;

/// How a list query consults the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchPolicy {
    /// Serve from cache when present, otherwise fetch and store.
    #[default]
    CacheFirst,
    /// Always fetch, then store.
    NetworkOnly,
    /// Always fetch, never store.
    NoCache,
}

impl FetchPolicy {
    /// Whether a cached value may answer the query.
    pub fn reads_cache(&self) -> bool {
        matches!(self, FetchPolicy::CacheFirst)
    }

    /// Whether a network result is written back.
    pub fn writes_cache(&self) -> bool {
        !matches!(self, FetchPolicy::NoCache)
    }
}

/// Where the data currently on screen came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Data was freshly fetched from the transport.
    Fresh,
    /// Data was served from cache.
    FromCache,
}

impl CacheStatus {
    /// Get the display icon for the cache status.
    pub fn icon(&self) -> &'static str {
        match self {
            CacheStatus::Fresh => "●",
            CacheStatus::FromCache => "○",
        }
    }

    /// Get the display text for the cache status.
    pub fn text(&self) -> &'static str {
        match self {
            CacheStatus::Fresh => "Live",
            CacheStatus::FromCache => "Cached",
        }
    }
}

/// A cache entry with metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached `data` member of a query response.
    pub data: Value,
    /// When the entry was stored.
    pub stored_at: Instant,
}

impl CacheEntry {
    fn new(data: Value) -> Self {
        Self {
            data,
            stored_at: Instant::now(),
        }
    }

    /// Get the age of the cache entry.
    pub fn age(&self) -> Duration {
        self.stored_at.elapsed()
    }
}

/// Query result cache.
#[derive(Debug)]
pub struct QueryCache {
    entries: HashMap<String, CacheEntry>,
    ttl: Option<Duration>,
    max_entries: usize,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    /// Create an unbounded-lifetime cache.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            ttl: None,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }

    /// Expire entries older than `ttl`.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Limit the number of stored entries.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    /// Look up a live entry.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let entry = self.entries.get(key)?;
        if let Some(ttl) = self.ttl {
            if entry.age() > ttl {
                trace!(key, "Cache entry expired");
                return None;
            }
        }
        Some(&entry.data)
    }

    /// Store or replace an entry.
    pub fn insert(&mut self, key: impl Into<String>, data: Value) {
        let key = key.into();
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.evict_oldest();
        }
        trace!(key = %key, "Cache store");
        self.entries.insert(key, CacheEntry::new(data));
    }

    /// Drop an entry so the next read goes to the network.
    pub fn invalidate(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            debug!(key, "Cache entry invalidated");
        }
        removed
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.stored_at)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            debug!(key = %key, "Evicting oldest cache entry");
            self.entries.remove(&key);
        }
    }
}
