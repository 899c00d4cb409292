//! Command handlers. Results go to stdout; logs go to stderr.

use std::sync::Arc;

use socialyze_cache::{CacheStore, NullCache};
use socialyze_core::{AppConfig, ScrapeRequest};
use socialyze_pipeline::{default_fetchers, ScrapePipeline};
use socialyze_scraper::HackerNewsScraper;

use crate::CacheMode;

async fn open_cache(config: &AppConfig, mode: CacheMode) -> Arc<dyn CacheStore> {
    match mode {
        CacheMode::Redis => socialyze_cache::connect_cache(&config.redis_url).await,
        CacheMode::Disabled => Arc::new(NullCache),
    }
}

/// Runs one scrape through the full pipeline and prints the result.
///
/// # Errors
///
/// Returns an error if the pipeline cannot be built or the scrape fails.
pub(crate) async fn run_scrape(
    config: &AppConfig,
    platform: &str,
    target: &str,
    mode: CacheMode,
) -> anyhow::Result<()> {
    let cache = open_cache(config, mode).await;
    let pipeline = ScrapePipeline::from_config(config, cache)?;

    let output = pipeline
        .run(&ScrapeRequest {
            platform: platform.to_string(),
            target: target.to_string(),
        })
        .await?;

    if output.is_cached() {
        tracing::info!(platform, target, "served from cache");
    }
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Prints ranked front-page stories followed by the model's summary.
///
/// # Errors
///
/// Returns an error if the HTTP or model clients cannot be built.
pub(crate) async fn run_headlines(config: &AppConfig) -> anyhow::Result<()> {
    let scraper = HackerNewsScraper::new(&config.hacker_news_url, &config.user_agent)?;
    let analyzer = socialyze_pipeline::gemini_analyzer(config)?;

    let stories = scraper.top_stories().await;
    for story in &stories {
        println!("{:>3}. {}", story.rank, story.title);
        println!("     {}", story.link);
    }
    if !stories.is_empty() {
        println!();
    }

    let model = analyzer.model();
    let summary = socialyze_analyzer::summarize_headlines(model.as_ref(), &stories).await;
    println!("{summary}");
    Ok(())
}

/// # Errors
///
/// Returns an error if a fetcher's HTTP client cannot be built.
pub(crate) fn run_platforms(config: &AppConfig) -> anyhow::Result<()> {
    let fetchers = default_fetchers(config)?;
    for platform in fetchers.platforms() {
        println!("{platform}");
    }
    Ok(())
}
