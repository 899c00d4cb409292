use std::sync::Arc;

use serde::Serialize;
use socialyze_analyzer::Analyzer;
use socialyze_cache::{cache_key, CacheBackend, CacheStore, CACHE_TTL};
use socialyze_core::{AnalysisResult, ScrapeRequest};
use socialyze_scraper::FetcherRegistry;

use crate::error::PipelineError;

/// What a successful scrape hands back.
///
/// Both variants serialize to the same `{analysis, raw_data}` shape; a cache
/// hit is returned as stored, without re-validation.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ScrapeOutput {
    Cached(serde_json::Value),
    Fresh(AnalysisResult),
}

impl ScrapeOutput {
    #[must_use]
    pub fn is_cached(&self) -> bool {
        matches!(self, Self::Cached(_))
    }
}

#[derive(Clone)]
pub struct ScrapePipeline {
    fetchers: FetcherRegistry,
    analyzer: Analyzer,
    cache: Arc<dyn CacheStore>,
}

impl ScrapePipeline {
    #[must_use]
    pub fn new(fetchers: FetcherRegistry, analyzer: Analyzer, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            fetchers,
            analyzer,
            cache,
        }
    }

    /// Serves `request` from cache, or fetches, analyzes and caches it.
    ///
    /// The platform is matched case-insensitively. Cache failures never
    /// surface here; they read as misses and dropped writes.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::UnsupportedPlatform`]: no fetcher is registered;
    ///   neither the cache nor any fetcher is touched.
    /// - [`PipelineError::UpstreamFetch`]: the fetcher failed; the model is
    ///   not called.
    /// - [`PipelineError::AnalysisParse`] / [`PipelineError::AnalysisProvider`]:
    ///   the model call failed or returned invalid JSON.
    pub async fn run(&self, request: &ScrapeRequest) -> Result<ScrapeOutput, PipelineError> {
        let platform = request.platform.to_lowercase();
        let Some(fetcher) = self.fetchers.get(&platform) else {
            tracing::info!(platform = %platform, "rejected unsupported platform");
            return Err(PipelineError::UnsupportedPlatform(platform));
        };

        let key = cache_key(&platform, &request.target);
        if let Some(hit) = self.lookup(&key).await {
            tracing::info!(cache_key = %key, "cache hit");
            return Ok(ScrapeOutput::Cached(hit));
        }
        tracing::info!(cache_key = %key, "cache miss; fetching profile");

        let record = fetcher.fetch(&request.target).await.map_err(|e| {
            tracing::warn!(platform = %platform, error = %e, "profile fetch failed");
            PipelineError::UpstreamFetch(e)
        })?;

        let result = self.analyzer.analyze(record, &platform).await.map_err(|e| {
            tracing::warn!(platform = %platform, error = %e, "profile analysis failed");
            PipelineError::from(e)
        })?;

        match serde_json::to_string(&result) {
            Ok(serialized) => {
                self.cache.set(&key, &serialized, CACHE_TTL).await;
                tracing::debug!(cache_key = %key, ttl_secs = CACHE_TTL.as_secs(), "cached analysis");
            }
            Err(e) => tracing::warn!(cache_key = %key, error = %e, "could not serialize analysis for cache"),
        }

        Ok(ScrapeOutput::Fresh(result))
    }

    /// Registered platform tags in sorted order.
    #[must_use]
    pub fn supported_platforms(&self) -> Vec<&str> {
        self.fetchers.platforms()
    }

    #[must_use]
    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    #[must_use]
    pub fn cache_backend(&self) -> CacheBackend {
        self.cache.backend()
    }

    async fn lookup(&self, key: &str) -> Option<serde_json::Value> {
        let raw = self.cache.get(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(cache_key = %key, error = %e, "ignoring unparseable cache entry");
                None
            }
        }
    }
}

impl std::fmt::Debug for ScrapePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrapePipeline")
            .field("fetchers", &self.fetchers)
            .field("cache", &self.cache.backend())
            .finish_non_exhaustive()
    }
}
