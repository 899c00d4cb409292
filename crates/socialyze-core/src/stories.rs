use serde::{Deserialize, Serialize};

/// One ranked story from the Hacker News front page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HackerNewsStory {
    pub rank: u32,
    pub title: String,
    /// Absolute http(s) URL of the story.
    pub link: String,
}
