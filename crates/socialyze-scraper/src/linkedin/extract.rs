use scraper::{Html, Selector};
use socialyze_core::LinkedInProfile;

use super::selectors::LinkedInSelectors;

/// Placeholder for a name or headline that could not be read.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for an about section that is missing from the page.
pub const ABOUT_UNAVAILABLE: &str = "About section not found or is private.";

/// Reads profile fields from rendered profile HTML.
///
/// Each field is extracted on its own; one that cannot be found falls back
/// to its placeholder without affecting the others.
#[must_use]
pub fn extract_profile(
    html: &str,
    selectors: &LinkedInSelectors,
    profile_url: &str,
) -> LinkedInProfile {
    let document = Html::parse_document(html);

    let name = first_text(&document, &selectors.name)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let headline = first_text(&document, &selectors.headline)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let about = match first_text(&document, &selectors.about) {
        Some(text) if !text.is_empty() => text,
        Some(_) => NOT_AVAILABLE.to_string(),
        None => ABOUT_UNAVAILABLE.to_string(),
    };

    LinkedInProfile {
        name,
        headline,
        about,
        profile_url: profile_url.to_string(),
    }
}

/// Trimmed text of the first element matching `selector`.
///
/// `None` when nothing matches or the selector does not parse.
fn first_text(document: &Html, selector: &str) -> Option<String> {
    let parsed = match Selector::parse(selector) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(selector, error = %e, "invalid profile selector");
            return None;
        }
    };
    document
        .select(&parsed)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}
