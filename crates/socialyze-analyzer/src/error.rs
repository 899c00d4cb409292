use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The model answered, but not with parseable JSON.
    #[error("model response is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The model call itself failed (quota, network, auth, bad request).
    #[error("{0}")]
    Provider(String),

    #[error("HTTP client setup failed: {0}")]
    ClientSetup(#[from] reqwest::Error),
}
