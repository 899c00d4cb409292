use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Browser-like user agent; LinkedIn and Google both serve degraded pages to
/// obvious bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let gemini_api_key = require("GEMINI_API_KEY")?;
    let env = parse_environment(&or_default("SOCIALYZE_ENV", "development"))?;

    let bind_addr = parse_addr("SOCIALYZE_BIND_ADDR", "0.0.0.0:5000")?;
    let log_level = or_default("SOCIALYZE_LOG_LEVEL", "info");

    let gemini_model = or_default("GEMINI_MODEL", "gemini-1.5-flash-latest");
    let gemini_base_url = or_default(
        "GEMINI_BASE_URL",
        "https://generativelanguage.googleapis.com",
    );
    let redis_url = or_default("REDIS_URL", "redis://redis");

    let request_timeout_secs = parse_u64("SOCIALYZE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SOCIALYZE_USER_AGENT", DEFAULT_USER_AGENT);

    let github_api_base_url = or_default("GITHUB_API_BASE_URL", "https://api.github.com");
    let github_token = lookup("GITHUB_TOKEN").ok().filter(|t| !t.trim().is_empty());
    let webdriver_url = or_default("WEBDRIVER_URL", "http://localhost:4444");
    let search_base_url = or_default("SEARCH_BASE_URL", "https://www.google.com");
    let hacker_news_url = or_default("HACKER_NEWS_URL", "https://news.ycombinator.com/");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        gemini_api_key,
        gemini_model,
        gemini_base_url,
        redis_url,
        request_timeout_secs,
        user_agent,
        github_api_base_url,
        github_token,
        webdriver_url,
        search_base_url,
        hacker_news_url,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SOCIALYZE_ENV".to_string(),
            reason: format!("expected development, test, or production; got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
