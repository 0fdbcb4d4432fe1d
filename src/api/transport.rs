//! The transport seam and the cache-aware client built on top of it.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::error::Result;
use super::types::OperationRequest;
use crate::cache::{CacheStatus, FetchPolicy, QueryCache};

/// Executes GraphQL operations and yields the response `data` member.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Short name for logs and the status bar.
    fn name(&self) -> &str;

    /// Execute a query or mutation.
    async fn execute(&self, request: &OperationRequest) -> Result<Value>;
}

/// A query result together with where it came from.
#[derive(Debug, Clone)]
pub struct QueryResponse {
    pub data: Value,
    pub status: CacheStatus,
}

/// Cache-aware GraphQL client shared by every table.
///
/// Cheap to clone; clones share the transport and the cache.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    cache: Arc<RwLock<QueryCache>>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("transport", &self.transport.name())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client with an empty cache.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_cache(transport, QueryCache::new())
    }

    /// Create a client with a preconfigured cache.
    pub fn with_cache(transport: Arc<dyn Transport>, cache: QueryCache) -> Self {
        Self {
            transport,
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Name of the underlying transport.
    pub fn transport_name(&self) -> &str {
        self.transport.name()
    }

    /// Run a list query under the given fetch policy.
    #[instrument(skip(self, request), fields(operation = %request.document.operation_name()))]
    pub async fn query(&self, request: &OperationRequest, policy: FetchPolicy) -> Result<QueryResponse> {
        let key = request.cache_key();

        if policy.reads_cache() {
            if let Some(data) = self.cache.read().await.get(&key) {
                debug!("Serving query from cache");
                return Ok(QueryResponse {
                    data: data.clone(),
                    status: CacheStatus::FromCache,
                });
            }
        }

        let data = self.transport.execute(request).await?;
        if policy.writes_cache() {
            self.cache.write().await.insert(key, data.clone());
        }

        Ok(QueryResponse {
            data,
            status: CacheStatus::Fresh,
        })
    }

    /// Execute a mutation. Mutations are never cached or retried.
    #[instrument(skip(self, request), fields(operation = %request.document.operation_name()))]
    pub async fn mutate(&self, request: &OperationRequest) -> Result<Value> {
        self.transport.execute(request).await
    }

    /// Invalidate a list query and fetch it again from the transport.
    pub async fn refetch(&self, request: &OperationRequest) -> Result<QueryResponse> {
        self.invalidate(request).await;
        self.query(request, FetchPolicy::NetworkOnly).await
    }

    /// Drop the cached result of a query.
    pub async fn invalidate(&self, request: &OperationRequest) {
        self.cache.write().await.invalidate(&request.cache_key());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Document;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingTransport {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Transport for CountingTransport {
        fn name(&self) -> &str {
            "counting"
        }

        async fn execute(&self, _request: &OperationRequest) -> Result<Value> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(json!({ "n": n }))
        }
    }

    fn setup() -> (Arc<CountingTransport>, Client, OperationRequest) {
        let transport = Arc::new(CountingTransport {
            calls: AtomicUsize::new(0),
        });
        let client = Client::new(transport.clone());
        let request = OperationRequest::without_variables(Document::query("Q", "query Q { n }"));
        (transport, client, request)
    }

    #[tokio::test]
    async fn test_cache_first_hits_transport_once() {
        let (transport, client, request) = setup();

        let first = client.query(&request, FetchPolicy::CacheFirst).await.unwrap();
        let second = client.query(&request, FetchPolicy::CacheFirst).await.unwrap();

        assert_eq!(first.status, CacheStatus::Fresh);
        assert_eq!(second.status, CacheStatus::FromCache);
        assert_eq!(second.data, json!({"n": 1}));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_network_only_always_fetches() {
        let (transport, client, request) = setup();

        client.query(&request, FetchPolicy::NetworkOnly).await.unwrap();
        let second = client.query(&request, FetchPolicy::NetworkOnly).await.unwrap();

        assert_eq!(second.data, json!({"n": 2}));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);

        let cached = client.query(&request, FetchPolicy::CacheFirst).await.unwrap();
        assert_eq!(cached.status, CacheStatus::FromCache);
        assert_eq!(cached.data, json!({"n": 2}));
    }

    #[tokio::test]
    async fn test_no_cache_does_not_store() {
        let (transport, client, request) = setup();
        client.query(&request, FetchPolicy::NoCache).await.unwrap();

        let next = client.query(&request, FetchPolicy::CacheFirst).await.unwrap();
        assert_eq!(next.status, CacheStatus::Fresh);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_with_cache_applies_ttl() {
        let transport = Arc::new(CountingTransport {
            calls: AtomicUsize::new(0),
        });
        let client = Client::with_cache(
            transport.clone(),
            QueryCache::new().with_ttl(std::time::Duration::from_millis(1)),
        );
        let request = OperationRequest::without_variables(Document::query("Q", "query Q { n }"));

        client.query(&request, FetchPolicy::CacheFirst).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = client.query(&request, FetchPolicy::CacheFirst).await.unwrap();

        assert_eq!(second.status, CacheStatus::Fresh);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_refetch_replaces_cached_value() {
        let (_, client, request) = setup();

        client.query(&request, FetchPolicy::CacheFirst).await.unwrap();
        let refetched = client.refetch(&request).await.unwrap();
        let cached = client.query(&request, FetchPolicy::CacheFirst).await.unwrap();

        assert_eq!(refetched.data, json!({"n": 2}));
        assert_eq!(cached.data, json!({"n": 2}));
        assert_eq!(cached.status, CacheStatus::FromCache);
    }
}
