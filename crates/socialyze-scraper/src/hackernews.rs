//! Hacker News front-page headline scraper.

use std::time::Duration;

use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use socialyze_core::HackerNewsStory;

use crate::error::FetchError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_REDIRECTS: usize = 5;

pub struct HackerNewsScraper {
    client: Client,
    url: String,
}

impl HackerNewsScraper {
    /// # Errors
    ///
    /// Returns [`FetchError::ClientSetup`] if the HTTP client cannot be built.
    pub fn new(url: &str, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Scrapes the current front-page stories.
    ///
    /// Request failures are logged and produce an empty list; the headline
    /// summary treats "no stories" as a normal outcome.
    pub async fn top_stories(&self) -> Vec<HackerNewsStory> {
        match self.fetch_front_page().await {
            Ok(html) => {
                let stories = parse_front_page(&html);
                tracing::info!(count = stories.len(), "scraped Hacker News front page");
                stories
            }
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "failed to fetch Hacker News front page");
                Vec::new()
            }
        }
    }

    async fn fetch_front_page(&self) -> Result<String, reqwest::Error> {
        self.client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

/// Parses story rows out of front-page HTML.
///
/// Rows without a numeric rank, without a title link, or whose link is not
/// an absolute http(s) URL (e.g. `item?id=...` for Ask HN) are skipped.
#[must_use]
pub fn parse_front_page(html: &str) -> Vec<HackerNewsStory> {
    let (Ok(row), Ok(rank), Ok(title)) = (
        Selector::parse("tr.athing"),
        Selector::parse("span.rank"),
        Selector::parse("span.titleline > a"),
    ) else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    document
        .select(&row)
        .filter_map(|item| parse_story(item, &rank, &title))
        .collect()
}

fn parse_story(item: ElementRef<'_>, rank: &Selector, title: &Selector) -> Option<HackerNewsStory> {
    let rank_text = item.select(rank).next()?.text().collect::<String>();
    let title_el = item.select(title).next()?;

    let Ok(rank) = rank_text.trim().trim_end_matches('.').parse::<u32>() else {
        tracing::debug!(rank = rank_text.trim(), "skipping story with unparseable rank");
        return None;
    };

    let link = title_el.value().attr("href")?;
    if !is_absolute_http_url(link) {
        tracing::debug!(link, "skipping story without an absolute link");
        return None;
    }

    Some(HackerNewsStory {
        rank,
        title: title_el.text().collect::<String>(),
        link: link.to_string(),
    })
}

fn is_absolute_http_url(link: &str) -> bool {
    reqwest::Url::parse(link).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRONT_PAGE: &str = r#"
        <html><body><table>
          <tr class="athing" id="1">
            <td><span class="rank">1.</span></td>
            <td><span class="titleline"><a href="https://example.com/rust">Rust 2.0 released</a>
              <span class="sitebit">(example.com)</span></span></td>
          </tr>
          <tr><td class="subtext">100 points</td></tr>
          <tr class="athing" id="2">
            <td><span class="rank">2.</span></td>
            <td><span class="titleline"><a href="item?id=2">Ask HN: Favorite editor?</a></span></td>
          </tr>
          <tr class="athing" id="3">
            <td><span class="rank">3.</span></td>
            <td><span class="titleline"><a href="http://example.org/db">A new database</a></span></td>
          </tr>
          <tr class="athing" id="4">
            <td><span class="rank">x.</span></td>
            <td><span class="titleline"><a href="https://example.net">Bad rank</a></span></td>
          </tr>
          <tr class="athing" id="5">
            <td><span class="rank">5.</span></td>
          </tr>
        </table></body></html>
    "#;

    #[test]
    fn parses_ranked_stories_with_absolute_links() {
        let stories = parse_front_page(FRONT_PAGE);
        assert_eq!(
            stories,
            vec![
                HackerNewsStory {
                    rank: 1,
                    title: "Rust 2.0 released".to_string(),
                    link: "https://example.com/rust".to_string(),
                },
                HackerNewsStory {
                    rank: 3,
                    title: "A new database".to_string(),
                    link: "http://example.org/db".to_string(),
                },
            ]
        );
    }

    #[test]
    fn empty_page_has_no_stories() {
        assert!(parse_front_page("<html></html>").is_empty());
    }

    #[test]
    fn relative_and_non_http_links_are_rejected() {
        assert!(!is_absolute_http_url("item?id=1"));
        assert!(!is_absolute_http_url("ftp://example.com/file"));
        assert!(is_absolute_http_url("https://example.com"));
    }
}
