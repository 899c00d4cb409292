use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use socialyze_core::ScrapeRequest;
use socialyze_pipeline::{PipelineError, ScrapeOutput};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

pub(super) async fn scrape_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Json<ScrapeOutput>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        ApiError::new(req_id.0.clone(), "validation_error", rejection.body_text())
    })?;

    tracing::info!(
        request_id = %req_id.0,
        platform = %request.platform,
        target = %request.target,
        "scrape requested"
    );

    state
        .pipeline
        .run(&request)
        .await
        .map(Json)
        .map_err(|e| map_pipeline_error(req_id.0, &e))
}

fn map_pipeline_error(request_id: String, error: &PipelineError) -> ApiError {
    if error.is_client_error() {
        tracing::info!(request_id = %request_id, error = %error, "scrape rejected");
    } else {
        tracing::error!(request_id = %request_id, code = error.code(), error = %error, "scrape failed");
    }
    ApiError::new(request_id, error.code(), error.to_string())
}
