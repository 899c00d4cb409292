use std::sync::Arc;

use socialyze_core::{AnalysisResult, ProfileRecord};

use crate::error::AnalyzerError;
use crate::model::{GenerativeModel, ResponseFormat};
use crate::prompts::PromptRegistry;

/// Turns profile records into structured model insights.
#[derive(Clone)]
pub struct Analyzer {
    model: Arc<dyn GenerativeModel>,
    prompts: PromptRegistry,
}

impl Analyzer {
    #[must_use]
    pub fn new(model: Arc<dyn GenerativeModel>, prompts: PromptRegistry) -> Self {
        Self { model, prompts }
    }

    #[must_use]
    pub fn model(&self) -> Arc<dyn GenerativeModel> {
        Arc::clone(&self.model)
    }

    /// Makes exactly one JSON-mode model call for `record` and pairs the
    /// parsed answer with the record.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Provider`] when the model call fails and
    /// [`AnalyzerError::Parse`] when the answer is not valid JSON. There is
    /// no retry either way.
    pub async fn analyze(
        &self,
        record: ProfileRecord,
        platform: &str,
    ) -> Result<AnalysisResult, AnalyzerError> {
        let prompt = self.prompts.build_prompt(platform, &record);
        let text = self.model.generate(&prompt, ResponseFormat::Json).await?;

        let analysis: serde_json::Value =
            serde_json::from_str(&text).map_err(AnalyzerError::Parse)?;

        tracing::debug!(platform, "analysis parsed");

        Ok(AnalysisResult {
            analysis,
            raw_data: record,
        })
    }
}
