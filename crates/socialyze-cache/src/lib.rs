//! Result cache for scrape analyses.
//!
//! The pipeline talks to an [`CacheStore`] chosen once at startup. When the
//! Redis service cannot be reached, [`connect_cache`] hands back a
//! [`NullCache`] so every lookup misses and every write is dropped; request
//! handling never sees a cache error.

pub mod error;
pub mod memory;
pub mod null;
pub mod redis_cache;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

pub use error::CacheError;
pub use memory::MemoryCache;
pub use null::NullCache;
pub use redis_cache::RedisCache;

/// Lifetime of a cached analysis, measured from the write.
pub const CACHE_TTL: Duration = Duration::from_secs(1800);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Which backend is serving the cache, reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    Redis,
    Memory,
    Disabled,
}

impl CacheBackend {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Redis => "redis",
            Self::Memory => "memory",
            Self::Disabled => "disabled",
        }
    }
}

/// String-keyed store of serialized results with per-key expiry.
///
/// Implementations swallow backend failures: `get` reports a miss and `set`
/// becomes a no-op, after logging.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;

    async fn set(&self, key: &str, value: &str, ttl: Duration);

    fn backend(&self) -> CacheBackend;
}

/// Builds the cache key for one platform/target pair.
///
/// `platform` is expected to be lowercased already.
#[must_use]
pub fn cache_key(platform: &str, target: &str) -> String {
    format!("scraper:{platform}:{target}")
}

/// Connects to the Redis service at `url`, falling back to [`NullCache`].
///
/// A single attempt is made, capped at a few seconds. Failure is logged and
/// caching stays disabled for the life of the process.
pub async fn connect_cache(url: &str) -> Arc<dyn CacheStore> {
    match tokio::time::timeout(CONNECT_TIMEOUT, RedisCache::connect(url)).await {
        Ok(Ok(cache)) => {
            tracing::info!("connected to redis cache");
            Arc::new(cache)
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "could not connect to redis; caching disabled");
            Arc::new(NullCache)
        }
        Err(_) => {
            tracing::warn!(
                timeout_secs = CONNECT_TIMEOUT.as_secs(),
                "timed out connecting to redis; caching disabled"
            );
            Arc::new(NullCache)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_joins_platform_and_target() {
        assert_eq!(cache_key("github", "octocat"), "scraper:github:octocat");
    }

    #[test]
    fn cache_key_keeps_target_verbatim() {
        assert_eq!(
            cache_key("linkedin", "https://www.linkedin.com/in/ada?trk=x"),
            "scraper:linkedin:https://www.linkedin.com/in/ada?trk=x"
        );
    }

    #[test]
    fn cache_ttl_is_thirty_minutes() {
        assert_eq!(CACHE_TTL.as_secs(), 1800);
    }

    #[tokio::test]
    async fn connect_cache_falls_back_to_null_cache_for_bad_url() {
        let cache = connect_cache("not-a-redis-url").await;
        assert_eq!(cache.backend(), CacheBackend::Disabled);
        assert!(cache.get("scraper:github:octocat").await.is_none());
    }
}
