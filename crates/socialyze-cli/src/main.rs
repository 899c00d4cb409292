mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Where scrape results are cached for a CLI run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CacheMode {
    /// The configured Redis service, falling back to no cache.
    Redis,
    Disabled,
}

#[derive(Debug, Parser)]
#[command(name = "socialyze-cli")]
#[command(about = "Scrape and analyze social profiles from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape a profile, analyze it, and print the result as JSON
    Scrape {
        /// Platform tag, e.g. github or linkedin
        #[arg(long)]
        platform: String,

        /// Username or profile URL, depending on the platform
        #[arg(long)]
        target: String,

        /// Skip the cache entirely
        #[arg(long)]
        no_cache: bool,
    },
    /// Print the Hacker News front page and a generated summary
    Headlines,
    /// List the platforms the scraper supports
    Platforms,
}

impl Commands {
    fn cache_mode(no_cache: bool) -> CacheMode {
        if no_cache {
            CacheMode::Disabled
        } else {
            CacheMode::Redis
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("socialyze-cli: run with --help to list commands");
        return Ok(());
    };

    let config = socialyze_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Scrape {
            platform,
            target,
            no_cache,
        } => {
            let mode = Commands::cache_mode(no_cache);
            commands::run_scrape(&config, &platform, &target, mode).await
        }
        Commands::Headlines => commands::run_headlines(&config).await,
        Commands::Platforms => commands::run_platforms(&config),
    }
}
