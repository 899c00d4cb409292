//! Builds the production pipeline from [`AppConfig`].

use std::sync::Arc;

use socialyze_analyzer::{Analyzer, AnalyzerError, GeminiClient, GeminiConfig, PromptRegistry};
use socialyze_cache::CacheStore;
use socialyze_core::AppConfig;
use socialyze_scraper::{
    FetchError, FetcherRegistry, GithubFetcher, LinkedInConfig, LinkedInFetcher, LinkedInSelectors,
};

use crate::error::SetupError;
use crate::pipeline::ScrapePipeline;

/// GitHub and LinkedIn fetchers configured from `config`.
///
/// # Errors
///
/// Returns [`FetchError::ClientSetup`] if an HTTP client cannot be built.
pub fn default_fetchers(config: &AppConfig) -> Result<FetcherRegistry, FetchError> {
    let github = GithubFetcher::new(
        config.request_timeout_secs,
        &config.user_agent,
        config.github_token.as_deref(),
    )?
    .with_base_url(&config.github_api_base_url);

    let linkedin = LinkedInFetcher::new(LinkedInConfig {
        webdriver_url: config.webdriver_url.clone(),
        search_base_url: config.search_base_url.clone(),
        user_agent: config.user_agent.clone(),
        selectors: LinkedInSelectors::default(),
    });

    Ok(FetcherRegistry::new()
        .with(Arc::new(github))
        .with(Arc::new(linkedin)))
}

/// Gemini-backed analyzer with the default prompt set.
///
/// # Errors
///
/// Returns [`AnalyzerError::ClientSetup`] if the HTTP client cannot be built.
pub fn gemini_analyzer(config: &AppConfig) -> Result<Analyzer, AnalyzerError> {
    let client = GeminiClient::new(&GeminiConfig {
        api_key: config.gemini_api_key.clone(),
        model: config.gemini_model.clone(),
        base_url: config.gemini_base_url.clone(),
        timeout_secs: config.request_timeout_secs,
    })?;
    Ok(Analyzer::new(Arc::new(client), PromptRegistry::default()))
}

impl ScrapePipeline {
    /// Wires fetchers and the analyzer from `config` around `cache`.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if any HTTP client cannot be built.
    pub fn from_config(config: &AppConfig, cache: Arc<dyn CacheStore>) -> Result<Self, SetupError> {
        Ok(Self::new(
            default_fetchers(config)?,
            gemini_analyzer(config)?,
            cache,
        ))
    }
}
