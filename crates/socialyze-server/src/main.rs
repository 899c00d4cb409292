mod api;
mod middleware;

use std::sync::Arc;

use socialyze_pipeline::ScrapePipeline;
use socialyze_scraper::HackerNewsScraper;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = socialyze_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(env = %config.env, bind_addr = %config.bind_addr, "starting socialyze server");

    let cache = socialyze_cache::connect_cache(&config.redis_url).await;
    let backend = cache.backend();
    let pipeline = ScrapePipeline::from_config(&config, cache)?;
    let headlines = HackerNewsScraper::new(&config.hacker_news_url, &config.user_agent)?;

    tracing::info!(
        platforms = ?pipeline.supported_platforms(),
        cache = backend.as_str(),
        "pipeline ready"
    );

    let app = build_app(AppState {
        pipeline: Arc::new(pipeline),
        headlines: Arc::new(headlines),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router owned the last cache handle; serve returning dropped it.
    tracing::info!(cache = backend.as_str(), "cache connection closed");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
