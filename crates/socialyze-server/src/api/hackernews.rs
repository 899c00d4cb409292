use axum::{extract::State, Extension, Json};
use serde::Serialize;
use socialyze_analyzer::summarize_headlines;
use socialyze_core::HackerNewsStory;

use crate::middleware::RequestId;

use super::AppState;

#[derive(Debug, Serialize)]
pub(super) struct HeadlineSummary {
    stories: Vec<HackerNewsStory>,
    summary: String,
}

/// Front-page stories plus a model-written summary. Never fails; upstream
/// problems show up as an empty story list or a fixed summary message.
pub(super) async fn summary(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<HeadlineSummary> {
    let stories = state.headlines.top_stories().await;
    tracing::info!(request_id = %req_id.0, stories = stories.len(), "summarizing headlines");

    let model = state.pipeline.analyzer().model();
    let summary = summarize_headlines(model.as_ref(), &stories).await;

    Json(HeadlineSummary { stories, summary })
}
