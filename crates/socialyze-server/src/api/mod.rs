mod hackernews;
mod scrape;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use socialyze_pipeline::ScrapePipeline;
use socialyze_scraper::HackerNewsScraper;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ScrapePipeline>,
    pub headlines: Arc<HackerNewsScraper>,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct RootData<'a> {
    message: &'static str,
    docs_url: &'static str,
    supported_platforms: Vec<&'a str>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    cache: &'static str,
}

#[derive(Debug, Serialize)]
struct RouteDoc {
    method: &'static str,
    path: &'static str,
    description: &'static str,
}

const ROUTES: &[RouteDoc] = &[
    RouteDoc {
        method: "GET",
        path: "/",
        description: "Service banner and supported platforms.",
    },
    RouteDoc {
        method: "GET",
        path: "/docs",
        description: "This route listing.",
    },
    RouteDoc {
        method: "GET",
        path: "/health",
        description: "Liveness and active cache backend.",
    },
    RouteDoc {
        method: "POST",
        path: "/scrape",
        description: "Body {platform, target}. Returns {analysis, raw_data}; cached for 30 minutes.",
    },
    RouteDoc {
        method: "GET",
        path: "/hackernews/summary",
        description: "Hacker News front page stories with a generated summary.",
    },
];

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "validation_error" | "unsupported_platform" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/docs", get(docs))
        .route("/health", get(health))
        .route("/scrape", post(scrape::scrape_profile))
        .route("/hackernews/summary", get(hackernews::summary))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Json(RootData {
        message: "Welcome to the AI-Powered Social Media Scraper API!",
        docs_url: "/docs",
        supported_platforms: state.pipeline.supported_platforms(),
    })
    .into_response()
}

async fn docs() -> Json<&'static [RouteDoc]> {
    Json(ROUTES)
}

async fn health(State(state): State<AppState>) -> Json<HealthData> {
    Json(HealthData {
        status: "ok",
        cache: state.pipeline.cache_backend().as_str(),
    })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
