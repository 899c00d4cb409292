use async_trait::async_trait;

use crate::error::AnalyzerError;

/// Output constraint requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// The provider guarantees syntactically valid JSON text.
    Json,
    Text,
}

/// A hosted text-generation model.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Sends `prompt` and returns the completion text.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Provider`] for any provider-side failure.
    async fn generate(&self, prompt: &str, format: ResponseFormat)
        -> Result<String, AnalyzerError>;
}
