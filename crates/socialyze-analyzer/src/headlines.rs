//! Witty one-paragraph summary of the Hacker News front page.

use std::fmt::Write as _;

use socialyze_core::HackerNewsStory;

use crate::model::{GenerativeModel, ResponseFormat};

pub const NO_HEADLINES: &str = "No headlines provided to summarize.";
pub const SUMMARY_FAILED: &str = "Failed to generate summary due to an API error.";

/// Summarizes `stories` in a single plain-text model call.
///
/// Never fails: an empty list and a model error both produce a fixed
/// message instead.
pub async fn summarize_headlines(model: &dyn GenerativeModel, stories: &[HackerNewsStory]) -> String {
    if stories.is_empty() {
        return NO_HEADLINES.to_string();
    }

    let prompt = headline_prompt(stories);
    match model.generate(&prompt, ResponseFormat::Text).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!(error = %e, "headline summary failed");
            SUMMARY_FAILED.to_string()
        }
    }
}

fn headline_prompt(stories: &[HackerNewsStory]) -> String {
    let mut prompt = String::from(
        "You are a witty tech analyst. Based on the following top headlines from \
         Hacker News, provide a short, insightful, and slightly humorous summary \
         of the current state of the tech world. What are the key trends?\n\n\
         Headlines:\n",
    );
    for story in stories {
        let _ = writeln!(prompt, "{}. {}", story.rank, story.title);
    }
    prompt.push_str("\nYour Summary:");
    prompt
}
