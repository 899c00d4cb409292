//! Platform dispatch for profile fetchers.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use socialyze_core::ProfileRecord;

use crate::error::FetchError;

/// Produces a normalized profile for one platform.
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    /// Lowercase platform tag this fetcher serves, e.g. `"github"`.
    fn platform(&self) -> &'static str;

    /// Fetches the profile identified by `target`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the upstream reports an error or cannot be
    /// reached. Implementations never panic on upstream data.
    async fn fetch(&self, target: &str) -> Result<ProfileRecord, FetchError>;
}

/// Maps platform tags to the fetcher that serves them.
#[derive(Clone, Default)]
pub struct FetcherRegistry {
    fetchers: BTreeMap<String, Arc<dyn ProfileFetcher>>,
}

impl FetcherRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `fetcher` under its own platform tag, replacing any
    /// previous fetcher for that tag.
    #[must_use]
    pub fn with(mut self, fetcher: Arc<dyn ProfileFetcher>) -> Self {
        self.register(fetcher);
        self
    }

    pub fn register(&mut self, fetcher: Arc<dyn ProfileFetcher>) {
        self.fetchers
            .insert(fetcher.platform().to_owned(), fetcher);
    }

    #[must_use]
    pub fn get(&self, platform: &str) -> Option<Arc<dyn ProfileFetcher>> {
        self.fetchers.get(platform).cloned()
    }

    /// Registered platform tags in sorted order.
    #[must_use]
    pub fn platforms(&self) -> Vec<&str> {
        self.fetchers.keys().map(String::as_str).collect()
    }
}

impl std::fmt::Debug for FetcherRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetcherRegistry")
            .field("platforms", &self.platforms())
            .finish()
    }
}
