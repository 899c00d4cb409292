//! Prompt templates, one per platform, with a generic fallback.

use std::collections::HashMap;
use std::sync::Arc;

use socialyze_core::ProfileRecord;

/// Builds the model instruction for one platform's profile records.
pub trait PromptTemplate: Send + Sync {
    fn build_prompt(&self, platform: &str, record: &ProfileRecord) -> String;
}

/// Asks for development focus, standout projects and skills.
#[derive(Debug, Clone, Copy, Default)]
pub struct GithubPrompt;

/// Asks for a professional summary; names the platform in the prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericPrompt;

impl PromptTemplate for GithubPrompt {
    fn build_prompt(&self, _platform: &str, record: &ProfileRecord) -> String {
        format!(
            r#"Analyze the provided GitHub profile data. Your response MUST be a valid JSON object.
Based on the repositories, languages, and descriptions, provide insights on the user's:
1. `primary_focus`: The main area of development (e.g., "Web Development", "Data Science").
2. `top_projects`: A list of 1-3 most significant projects, noting their stars and forks.
3. `key_skills`: A list of key programming languages and technologies observed.

Input data: {}"#,
            record_json(record)
        )
    }
}

impl PromptTemplate for GenericPrompt {
    fn build_prompt(&self, platform: &str, record: &ProfileRecord) -> String {
        format!(
            r#"Analyze the provided {platform} profile data. Your response MUST be a valid JSON object.
Based on the data, provide insights on the user's:
1. `professional_summary`: A brief, one-sentence summary of their professional profile.
2. `focus_areas`: A list of their key professional skills or focus areas.
3. `notable_highlights`: A list of 1-3 notable achievements or highlights from their profile.

Input data: {}"#,
            record_json(record)
        )
    }
}

// Derived serializers over string-keyed structs cannot fail.
fn record_json(record: &ProfileRecord) -> String {
    serde_json::to_string(record).unwrap_or_default()
}

/// Maps platform tags to templates; unknown platforms get the fallback.
#[derive(Clone)]
pub struct PromptRegistry {
    templates: HashMap<String, Arc<dyn PromptTemplate>>,
    fallback: Arc<dyn PromptTemplate>,
}

impl PromptRegistry {
    #[must_use]
    pub fn new(fallback: Arc<dyn PromptTemplate>) -> Self {
        Self {
            templates: HashMap::new(),
            fallback,
        }
    }

    #[must_use]
    pub fn with(mut self, platform: &str, template: Arc<dyn PromptTemplate>) -> Self {
        self.templates.insert(platform.to_owned(), template);
        self
    }

    #[must_use]
    pub fn template_for(&self, platform: &str) -> &dyn PromptTemplate {
        self.templates
            .get(platform)
            .map_or(self.fallback.as_ref(), AsRef::as_ref)
    }

    #[must_use]
    pub fn build_prompt(&self, platform: &str, record: &ProfileRecord) -> String {
        self.template_for(platform).build_prompt(platform, record)
    }
}

impl Default for PromptRegistry {
    /// GitHub gets its own template; everything else the generic one.
    fn default() -> Self {
        Self::new(Arc::new(GenericPrompt)).with("github", Arc::new(GithubPrompt))
    }
}
