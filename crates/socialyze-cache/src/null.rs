use std::time::Duration;

use async_trait::async_trait;

use crate::{CacheBackend, CacheStore};

/// Stand-in used when no cache service is reachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCache;

#[async_trait]
impl CacheStore for NullCache {
    async fn get(&self, _key: &str) -> Option<String> {
        None
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) {}

    fn backend(&self) -> CacheBackend {
        CacheBackend::Disabled
    }
}
