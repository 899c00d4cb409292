use socialyze_analyzer::AnalyzerError;
use socialyze_scraper::FetchError;
use thiserror::Error;

/// Failure of one scrape request.
///
/// `Display` is the message returned to API callers.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Platform '{0}' is not supported.")]
    UnsupportedPlatform(String),

    #[error("{0}")]
    UpstreamFetch(#[source] FetchError),

    #[error("Failed to parse the model's JSON response.")]
    AnalysisParse(#[source] serde_json::Error),

    #[error("An error occurred with the model API: {0}")]
    AnalysisProvider(String),
}

impl PipelineError {
    /// Stable machine-readable code for API error bodies.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedPlatform(_) => "unsupported_platform",
            Self::UpstreamFetch(_) => "upstream_fetch_error",
            Self::AnalysisParse(_) => "analysis_parse_error",
            Self::AnalysisProvider(_) => "analysis_provider_error",
        }
    }

    /// Whether the caller, rather than an upstream, is at fault.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::UnsupportedPlatform(_))
    }
}

impl From<AnalyzerError> for PipelineError {
    fn from(err: AnalyzerError) -> Self {
        match err {
            AnalyzerError::Parse(e) => Self::AnalysisParse(e),
            AnalyzerError::Provider(cause) => Self::AnalysisProvider(cause),
            AnalyzerError::ClientSetup(e) => Self::AnalysisProvider(e.to_string()),
        }
    }
}

/// Failure while wiring the pipeline from configuration.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("fetcher setup failed: {0}")]
    Fetcher(#[from] FetchError),

    #[error("analyzer setup failed: {0}")]
    Analyzer(#[from] AnalyzerError),
}
