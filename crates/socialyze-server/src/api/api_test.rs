use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::Request;
use socialyze_analyzer::{Analyzer, AnalyzerError, GenerativeModel, PromptRegistry, ResponseFormat};
use socialyze_cache::{MemoryCache, NullCache};
use socialyze_core::{GithubProfile, GithubUser, ProfileRecord};
use socialyze_scraper::{FetchError, FetcherRegistry, ProfileFetcher};
use tower::ServiceExt;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

struct StubFetcher {
    calls: AtomicUsize,
    fail_with: Option<&'static str>,
}

#[async_trait]
impl ProfileFetcher for StubFetcher {
    fn platform(&self) -> &'static str {
        "github"
    }

    async fn fetch(&self, target: &str) -> Result<ProfileRecord, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.fail_with {
            return Err(FetchError::Upstream(message.to_string()));
        }
        Ok(ProfileRecord::Github(GithubProfile {
            user: GithubUser {
                login: Some(target.to_string()),
                ..GithubUser::default()
            },
            repositories: Vec::new(),
        }))
    }
}

/// Answers JSON prompts with `json_reply` and text prompts with a fixed line.
struct StubModel {
    json_reply: &'static str,
}

#[async_trait]
impl GenerativeModel for StubModel {
    async fn generate(
        &self,
        _prompt: &str,
        format: ResponseFormat,
    ) -> Result<String, AnalyzerError> {
        Ok(match format {
            ResponseFormat::Json => self.json_reply.to_string(),
            ResponseFormat::Text => "Everyone is rewriting it in Rust.".to_string(),
        })
    }
}

struct Harness {
    app: Router,
    fetcher: Arc<StubFetcher>,
}

fn harness_with(
    fail_with: Option<&'static str>,
    json_reply: &'static str,
    cache: Arc<dyn socialyze_cache::CacheStore>,
    hacker_news_url: &str,
) -> Harness {
    let fetcher = Arc::new(StubFetcher {
        calls: AtomicUsize::new(0),
        fail_with,
    });
    let pipeline = ScrapePipeline::new(
        FetcherRegistry::new().with(fetcher.clone()),
        Analyzer::new(Arc::new(StubModel { json_reply }), PromptRegistry::default()),
        cache,
    );
    let headlines =
        HackerNewsScraper::new(hacker_news_url, "socialyze-test/0.1").expect("headline scraper");
    let app = build_app(AppState {
        pipeline: Arc::new(pipeline),
        headlines: Arc::new(headlines),
    });
    Harness { app, fetcher }
}

fn harness() -> Harness {
    harness_with(
        None,
        r#"{"primary_focus":"backend"}"#,
        Arc::new(MemoryCache::new()),
        "http://127.0.0.1:9/",
    )
}

fn scrape_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/scrape")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-request-id", "req-test")
        .body(Body::from(body.to_owned()))
        .expect("request")
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json parse")
}

#[test]
fn api_error_unsupported_platform_maps_to_bad_request() {
    let response = ApiError::new("req-1", "unsupported_platform", "nope").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn api_error_status_follows_pipeline_codes() {
    for (code, status) in [
        ("validation_error", StatusCode::BAD_REQUEST),
        ("unsupported_platform", StatusCode::BAD_REQUEST),
        ("upstream_fetch_error", StatusCode::INTERNAL_SERVER_ERROR),
        ("analysis_provider_error", StatusCode::INTERNAL_SERVER_ERROR),
        ("not_found", StatusCode::INTERNAL_SERVER_ERROR),
    ] {
        let response = ApiError::new("req-1", code, "detail").into_response();
        assert_eq!(response.status(), status, "code {code}");
    }
}

#[test]
fn api_error_unknown_code_maps_to_internal_error() {
    let response = ApiError::new("req-1", "analysis_parse_error", "bad").into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn root_lists_supported_platforms() {
    let response = harness()
        .app
        .oneshot(Request::builder().uri("/").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["docs_url"], "/docs");
    assert_eq!(json["supported_platforms"], serde_json::json!(["github"]));
    assert!(json["message"].as_str().is_some_and(|m| !m.is_empty()));
}

#[tokio::test]
async fn docs_lists_every_route() {
    let response = harness()
        .app
        .oneshot(Request::builder().uri("/docs").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    let json = json_body(response).await;
    let paths: Vec<&str> = json
        .as_array()
        .expect("route array")
        .iter()
        .filter_map(|r| r["path"].as_str())
        .collect();
    assert!(paths.contains(&"/scrape"));
    assert!(paths.contains(&"/hackernews/summary"));
}

#[tokio::test]
async fn health_reports_cache_backend() {
    let h = harness_with(None, "{}", Arc::new(NullCache), "http://127.0.0.1:9/");
    let response = h
        .app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "status": "ok", "cache": "disabled" })
    );
}

#[tokio::test]
async fn scrape_returns_analysis_and_serves_repeat_from_cache() {
    let h = harness();

    let first = h
        .app
        .clone()
        .oneshot(scrape_request(r#"{"platform":"github","target":"octocat"}"#))
        .await
        .expect("response");
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(
        first.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("req-test")
    );
    let first = json_body(first).await;
    assert_eq!(first["analysis"]["primary_focus"], "backend");
    assert_eq!(first["raw_data"]["user"]["login"], "octocat");

    let second = h
        .app
        .oneshot(scrape_request(r#"{"platform":"GITHUB","target":"octocat"}"#))
        .await
        .expect("response");
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(json_body(second).await, first);
    assert_eq!(h.fetcher.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unsupported_platform_is_bad_request() {
    let h = harness();
    let response = h
        .app
        .oneshot(scrape_request(r#"{"platform":"twitter","target":"someone"}"#))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "unsupported_platform");
    assert_eq!(json["error"]["message"], "Platform 'twitter' is not supported.");
    assert_eq!(json["meta"]["request_id"], "req-test");
    assert_eq!(h.fetcher.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn fetch_failure_is_server_error_with_upstream_message() {
    let h = harness_with(
        Some("Not Found"),
        "{}",
        Arc::new(MemoryCache::new()),
        "http://127.0.0.1:9/",
    );
    let response = h
        .app
        .oneshot(scrape_request(r#"{"platform":"github","target":"ghost"}"#))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "upstream_fetch_error");
    assert_eq!(json["error"]["message"], "Not Found");
}

#[tokio::test]
async fn invalid_model_json_is_server_error() {
    let h = harness_with(None, "not json", Arc::new(MemoryCache::new()), "http://127.0.0.1:9/");
    let response = h
        .app
        .oneshot(scrape_request(r#"{"platform":"github","target":"octocat"}"#))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "analysis_parse_error");
    assert_eq!(
        json["error"]["message"],
        "Failed to parse the model's JSON response."
    );
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let h = harness();
    let response = h
        .app
        .oneshot(scrape_request(r#"{"platform":"github"}"#))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(h.fetcher.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn hackernews_summary_returns_stories_and_summary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<table><tr class="athing"><td><span class="rank">1.</span></td>
            <td><span class="titleline"><a href="https://example.com/a">Story A</a></span></td></tr></table>"#,
        ))
        .mount(&server)
        .await;

    let h = harness_with(None, "{}", Arc::new(NullCache), &server.uri());
    let response = h
        .app
        .oneshot(
            Request::builder()
                .uri("/hackernews/summary")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(
        json["stories"],
        serde_json::json!([{ "rank": 1, "title": "Story A", "link": "https://example.com/a" }])
    );
    assert_eq!(json["summary"], "Everyone is rewriting it in Rust.");
}

#[tokio::test]
async fn hackernews_outage_yields_no_headlines_message() {
    let h = harness();
    let response = h
        .app
        .oneshot(
            Request::builder()
                .uri("/hackernews/summary")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["stories"], serde_json::json!([]));
    assert_eq!(json["summary"], "No headlines provided to summarize.");
}
