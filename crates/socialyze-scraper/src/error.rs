use thiserror::Error;

/// Failure reported by a profile fetcher.
///
/// The `Display` output is the message handed back to API callers, so the
/// wording of each variant is part of the response contract.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The upstream API answered with an error `message` (not found, rate
    /// limited, ...).
    #[error("{0}")]
    Upstream(String),

    /// The upstream answered with a body of an unexpected shape.
    #[error("{0}")]
    InvalidResponse(String),

    #[error("Failed to fetch {source_name} data: {message}")]
    Transport {
        source_name: &'static str,
        message: String,
    },

    #[error(
        "Failed to scrape LinkedIn profile. It might be private or the page structure has changed. Error: {0}"
    )]
    Browser(String),

    #[error("HTTP client setup failed: {0}")]
    ClientSetup(#[from] reqwest::Error),
}
