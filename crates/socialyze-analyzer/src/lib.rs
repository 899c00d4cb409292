//! Profile analysis through a hosted generative model.
//!
//! A platform-specific prompt is built from the profile record, sent to the
//! model with JSON output enforced, and the parsed answer is returned next
//! to the record it describes. Also hosts the Hacker News headline summary.

pub mod analyzer;
pub mod error;
pub mod gemini;
pub mod headlines;
pub mod model;
pub mod prompts;

pub use analyzer::Analyzer;
pub use error::AnalyzerError;
pub use gemini::{GeminiClient, GeminiConfig};
pub use headlines::summarize_headlines;
pub use model::{GenerativeModel, ResponseFormat};
pub use prompts::{GenericPrompt, GithubPrompt, PromptRegistry, PromptTemplate};
