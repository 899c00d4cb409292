pub mod error;
pub mod fetcher;
pub mod github;
pub mod hackernews;
pub mod linkedin;

pub use error::FetchError;
pub use fetcher::{FetcherRegistry, ProfileFetcher};
pub use github::GithubFetcher;
pub use hackernews::HackerNewsScraper;
pub use linkedin::{LinkedInConfig, LinkedInFetcher, LinkedInSelectors};
