use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde_json::Value;
use socialyze_core::{GithubProfile, GithubRepository, GithubUser, ProfileRecord};

use crate::error::FetchError;
use crate::fetcher::ProfileFetcher;

const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Page size for the repository listing; GitHub's maximum.
const REPOS_PER_PAGE: u32 = 100;

const INVALID_RESPONSE: &str = "Invalid response from GitHub API";

/// Characters left unescaped when a username is placed in a URL path.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Fetches a user and their repositories from the GitHub REST API.
///
/// Two sequential calls are made: the user profile, then one page of up to
/// 100 repositories. An error `message` in the user response stops the fetch
/// before the repository call.
pub struct GithubFetcher {
    client: Client,
    base_url: String,
}

impl GithubFetcher {
    /// Creates a fetcher against the public GitHub API.
    ///
    /// `token`, when present, is sent as a bearer token to lift the
    /// anonymous rate limit.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientSetup`] if the underlying `reqwest::Client`
    /// cannot be constructed or the token is not a valid header value.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        token: Option<&str>,
    ) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(token) = token {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "GITHUB_TOKEN is not a valid header value; ignoring it");
                }
            }
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Points the fetcher at a different API root (GitHub Enterprise, tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Fetches and normalizes the profile for `username`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Upstream`]: either response carried a `message` field.
    /// - [`FetchError::InvalidResponse`]: a body had an unexpected shape.
    /// - [`FetchError::Transport`]: network failure or non-JSON body.
    pub async fn fetch_profile(&self, username: &str) -> Result<GithubProfile, FetchError> {
        let user_body = self.get_json(&self.user_url(username)).await?;
        if let Some(message) = upstream_message(&user_body) {
            tracing::info!(username, message, "GitHub reported an error for user");
            return Err(FetchError::Upstream(message));
        }
        let user: GithubUser = serde_json::from_value(user_body)
            .map_err(|_| FetchError::InvalidResponse(INVALID_RESPONSE.to_string()))?;

        let repos_body = self.get_json(&self.repos_url(username)).await?;
        if let Some(message) = upstream_message(&repos_body) {
            return Err(FetchError::Upstream(message));
        }
        let repositories = extract_repositories(repos_body)?;

        tracing::debug!(
            username,
            repositories = repositories.len(),
            "fetched GitHub profile"
        );

        Ok(GithubProfile { user, repositories })
    }

    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let transport = |e: reqwest::Error| FetchError::Transport {
            source_name: "GitHub",
            message: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let body = response.text().await.map_err(transport)?;
        serde_json::from_str(&body).map_err(|e| FetchError::Transport {
            source_name: "GitHub",
            message: e.to_string(),
        })
    }

    fn user_url(&self, username: &str) -> String {
        format!(
            "{}/users/{}",
            self.base_url,
            utf8_percent_encode(username, PATH_SEGMENT)
        )
    }

    fn repos_url(&self, username: &str) -> String {
        format!(
            "{}/users/{}/repos?per_page={REPOS_PER_PAGE}",
            self.base_url,
            utf8_percent_encode(username, PATH_SEGMENT)
        )
    }
}

#[async_trait]
impl ProfileFetcher for GithubFetcher {
    fn platform(&self) -> &'static str {
        "github"
    }

    async fn fetch(&self, target: &str) -> Result<ProfileRecord, FetchError> {
        self.fetch_profile(target).await.map(ProfileRecord::Github)
    }
}

/// Returns the `message` field GitHub uses to report errors, if present.
fn upstream_message(body: &Value) -> Option<String> {
    let message = body.as_object()?.get("message")?;
    Some(
        message
            .as_str()
            .map_or_else(|| message.to_string(), str::to_owned),
    )
}

/// Pulls the fixed field subset out of a repository listing and orders it by
/// star count, highest first. Ties keep their upstream order.
fn extract_repositories(body: Value) -> Result<Vec<GithubRepository>, FetchError> {
    let Value::Array(items) = body else {
        return Err(FetchError::InvalidResponse(INVALID_RESPONSE.to_string()));
    };

    let mut repositories = items
        .into_iter()
        .map(serde_json::from_value::<GithubRepository>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| FetchError::InvalidResponse(INVALID_RESPONSE.to_string()))?;

    sort_by_stars(&mut repositories);
    Ok(repositories)
}

fn sort_by_stars(repositories: &mut [GithubRepository]) {
    repositories.sort_by(|a, b| {
        b.stargazers_count
            .unwrap_or(0)
            .cmp(&a.stargazers_count.unwrap_or(0))
    });
}

#[cfg(test)]
#[path = "github_test.rs"]
mod tests;
