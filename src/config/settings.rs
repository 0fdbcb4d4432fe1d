//! Application and backend settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_SEED_ROWS;
use crate::cache::{FetchPolicy, QueryCache, DEFAULT_MAX_ENTRIES};
use crate::ui::components::pagination::DEFAULT_PAGE_SIZE;

/// UI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The UI theme to use (`dark` or `light`).
    pub theme: String,
    /// Whether to use vim-style keybindings.
    pub vim_mode: bool,
    /// Rows per table page.
    pub page_size: usize,
    /// How list queries consult the cache.
    pub fetch_policy: FetchPolicy,
    /// Event loop tick in milliseconds.
    pub tick_rate_ms: u64,
    /// Seconds a cached list result stays usable. Unset means no expiry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_ttl_secs: Option<u64>,
    /// Cached list results kept before the oldest is evicted.
    pub cache_max_entries: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            vim_mode: true,
            page_size: DEFAULT_PAGE_SIZE,
            fetch_policy: FetchPolicy::CacheFirst,
            tick_rate_ms: 100,
            cache_ttl_secs: None,
            cache_max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl Settings {
    /// An empty query cache sized and aged per these settings.
    pub fn query_cache(&self) -> QueryCache {
        let cache = QueryCache::new().with_max_entries(self.cache_max_entries);
        match self.cache_ttl_secs {
            Some(secs) => cache.with_ttl(Duration::from_secs(secs)),
            None => cache,
        }
    }
}

/// Where GraphQL operations go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    /// HTTP GraphQL endpoint. The in-process mock is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Credentials the mock starts with.
    pub seed_rows: usize,
    /// Artificial mock latency in milliseconds.
    pub latency_ms: u64,
    /// Make every mock mutation fail.
    pub fail_mutations: bool,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            seed_rows: DEFAULT_SEED_ROWS,
            latency_ms: 300,
            fail_mutations: false,
        }
    }
}
