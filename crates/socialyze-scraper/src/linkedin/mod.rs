//! LinkedIn profile fetcher driven through a WebDriver browser session.
//!
//! LinkedIn has no public profile API, so the fetcher searches for the
//! profile on a search engine, follows the matching result, dismisses the
//! sign-in overlay when it appears and reads fields from the rendered page.
//! Every selector involved belongs to a third party and changes without
//! notice; see [`LinkedInSelectors`].

mod extract;
mod selectors;

use std::time::Duration;

use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder, Locator};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use socialyze_core::{LinkedInProfile, ProfileRecord};
use thiserror::Error;
use tokio::time::Instant;

use crate::error::FetchError;
use crate::fetcher::ProfileFetcher;

pub use extract::{extract_profile, ABOUT_UNAVAILABLE, NOT_AVAILABLE};
pub use selectors::LinkedInSelectors;

const NETWORK_IDLE_TIMEOUT: Duration = Duration::from_secs(30);
const RESULT_LINK_TIMEOUT: Duration = Duration::from_secs(10);
const DOM_CONTENT_TIMEOUT: Duration = Duration::from_secs(20);
const SETTLE_DELAY: Duration = Duration::from_secs(3);
const DISMISS_TIMEOUT: Duration = Duration::from_secs(5);
const DISMISS_PAUSE: Duration = Duration::from_secs(1);
const ABOUT_TIMEOUT: Duration = Duration::from_secs(5);
const READY_STATE_POLL: Duration = Duration::from_millis(250);

/// Where the browser session runs and how it presents itself.
#[derive(Debug, Clone)]
pub struct LinkedInConfig {
    /// WebDriver endpoint, e.g. chromedriver on `http://localhost:4444`.
    pub webdriver_url: String,
    /// Search engine root; the query goes to `{search_base_url}/search?q=`.
    pub search_base_url: String,
    pub user_agent: String,
    pub selectors: LinkedInSelectors,
}

/// Failure inside a live browser session, before conversion to [`FetchError`].
#[derive(Debug, Error)]
enum SessionError {
    #[error(transparent)]
    Command(#[from] fantoccini::error::CmdError),

    #[error("timed out after {}s waiting for {what}", .after.as_secs())]
    Timeout { what: &'static str, after: Duration },
}

pub struct LinkedInFetcher {
    config: LinkedInConfig,
}

impl LinkedInFetcher {
    #[must_use]
    pub fn new(config: LinkedInConfig) -> Self {
        Self { config }
    }

    /// Scrapes the profile identified by `profile_url`.
    ///
    /// One browser session is opened per call and closed before returning,
    /// whether or not scraping succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Browser`] if the session cannot be started or
    /// any navigation step fails. Missing individual fields are not errors;
    /// they come back as sentinels.
    pub async fn fetch_profile(&self, profile_url: &str) -> Result<LinkedInProfile, FetchError> {
        let client = self.open_session().await?;

        let outcome = self.scrape(&client, profile_url).await;

        if let Err(e) = client.close().await {
            tracing::warn!(error = %e, "failed to close browser session");
        }

        outcome.map_err(|e| {
            tracing::warn!(profile_url, error = %e, "LinkedIn scrape failed");
            FetchError::Browser(e.to_string())
        })
    }

    async fn open_session(&self) -> Result<Client, FetchError> {
        let mut builder = ClientBuilder::native();
        builder.capabilities(self.capabilities());
        builder
            .connect(&self.config.webdriver_url)
            .await
            .map_err(|e| {
                tracing::warn!(
                    webdriver_url = %self.config.webdriver_url,
                    error = %e,
                    "could not start browser session"
                );
                FetchError::Browser(e.to_string())
            })
    }

    fn capabilities(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut caps = serde_json::Map::new();
        caps.insert(
            "goog:chromeOptions".to_string(),
            serde_json::json!({
                "args": [
                    "--headless=new",
                    "--disable-gpu",
                    "--no-sandbox",
                    "--disable-dev-shm-usage",
                    format!("--user-agent={}", self.config.user_agent),
                ]
            }),
        );
        caps
    }

    async fn scrape(
        &self,
        client: &Client,
        profile_url: &str,
    ) -> Result<LinkedInProfile, SessionError> {
        let selectors = &self.config.selectors;

        let search_url = search_url(&self.config.search_base_url, profile_url);
        tracing::info!(profile_url, "searching for LinkedIn profile");
        client.goto(&search_url).await?;
        wait_for_ready_state(client, |s| s == "complete", NETWORK_IDLE_TIMEOUT, "search results")
            .await?;

        let link_selector = result_link_selector(profile_url);
        let link = client
            .wait()
            .at_most(RESULT_LINK_TIMEOUT)
            .for_element(Locator::Css(&link_selector))
            .await?;
        link.click().await?;

        wait_for_ready_state(client, |s| s != "loading", DOM_CONTENT_TIMEOUT, "profile page")
            .await?;
        tokio::time::sleep(SETTLE_DELAY).await;

        dismiss_overlay(client, &selectors.dismiss_button).await;

        if let Err(e) = client
            .wait()
            .at_most(ABOUT_TIMEOUT)
            .for_element(Locator::Css(&selectors.about))
            .await
        {
            tracing::debug!(error = %e, "about section did not appear");
        }

        let html = client.source().await?;
        Ok(extract_profile(&html, selectors, profile_url))
    }
}

#[async_trait]
impl ProfileFetcher for LinkedInFetcher {
    fn platform(&self) -> &'static str {
        "linkedin"
    }

    async fn fetch(&self, target: &str) -> Result<ProfileRecord, FetchError> {
        self.fetch_profile(target).await.map(ProfileRecord::LinkedIn)
    }
}

/// Clicks the sign-in overlay's dismiss control if it shows up.
///
/// Never fails: the overlay is not always served, and the page is usually
/// still readable behind it.
async fn dismiss_overlay(client: &Client, dismiss_selector: &str) {
    let button = match client
        .wait()
        .at_most(DISMISS_TIMEOUT)
        .for_element(Locator::Css(dismiss_selector))
        .await
    {
        Ok(button) => button,
        Err(e) => {
            tracing::info!(error = %e, "sign-in overlay not found; proceeding");
            return;
        }
    };

    match button.is_displayed().await {
        Ok(true) => {
            tracing::info!("dismissing sign-in overlay");
            if let Err(e) = button.click().await {
                tracing::info!(error = %e, "could not dismiss sign-in overlay; proceeding");
                return;
            }
            tokio::time::sleep(DISMISS_PAUSE).await;
        }
        Ok(false) => tracing::info!("sign-in overlay present but hidden; proceeding"),
        Err(e) => tracing::info!(error = %e, "sign-in overlay check failed; proceeding"),
    }
}

/// Polls `document.readyState` until `accept` returns true.
async fn wait_for_ready_state(
    client: &Client,
    accept: fn(&str) -> bool,
    timeout: Duration,
    what: &'static str,
) -> Result<(), SessionError> {
    let deadline = Instant::now() + timeout;
    loop {
        let state = client
            .execute("return document.readyState;", Vec::new())
            .await?;
        if state.as_str().is_some_and(accept) {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(SessionError::Timeout {
                what,
                after: timeout,
            });
        }
        tokio::time::sleep(READY_STATE_POLL).await;
    }
}

/// Builds the search-engine URL restricting results to LinkedIn profiles.
fn search_url(search_base_url: &str, profile_url: &str) -> String {
    let query = format!("site:linkedin.com/in/ \"{profile_url}\"");
    format!(
        "{}/search?q={}",
        search_base_url.trim_end_matches('/'),
        utf8_percent_encode(&query, NON_ALPHANUMERIC)
    )
}

/// CSS selector for the first result anchor pointing at the profile.
///
/// Query strings are dropped from the target since search results link to
/// the bare profile path.
fn result_link_selector(profile_url: &str) -> String {
    let bare = profile_url.split('?').next().unwrap_or(profile_url);
    format!("a[href*=\"{}\"]", escape_css_string(bare))
}

fn escape_css_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
