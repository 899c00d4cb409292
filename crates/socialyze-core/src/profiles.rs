use serde::{Deserialize, Serialize};

/// Body of a `POST /scrape` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeRequest {
    pub platform: String,
    /// Username or profile URL; meaning depends on the platform.
    pub target: String,
}

/// A normalized profile produced by one of the platform fetchers.
///
/// Serialized untagged so `raw_data` in an [`AnalysisResult`] keeps the
/// shape of the underlying platform record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileRecord {
    Github(GithubProfile),
    LinkedIn(LinkedInProfile),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubProfile {
    pub user: GithubUser,
    /// Sorted by `stargazers_count`, highest first.
    pub repositories: Vec<GithubRepository>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubUser {
    pub login: Option<String>,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub public_repos: Option<u64>,
    pub followers: Option<u64>,
    pub following: Option<u64>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubRepository {
    pub name: Option<String>,
    pub html_url: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: Option<u64>,
    pub forks_count: Option<u64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Fields scraped from a rendered LinkedIn profile page.
///
/// Each text field carries a sentinel when its own extraction failed; a
/// missing headline does not invalidate the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedInProfile {
    pub name: String,
    pub headline: String,
    pub about: String,
    pub profile_url: String,
}

impl ProfileRecord {
    #[must_use]
    pub fn as_github(&self) -> Option<&GithubProfile> {
        match self {
            Self::Github(profile) => Some(profile),
            Self::LinkedIn(_) => None,
        }
    }
}

/// Model analysis wrapped together with the record it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Model-defined JSON; shape depends on the prompt template.
    pub analysis: serde_json::Value,
    pub raw_data: ProfileRecord,
}
