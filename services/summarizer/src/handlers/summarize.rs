use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use tracing::warn;

use crate::error::ApiError;
use crate::models::{SummaryRequest, SummaryResponse};
use crate::AppState;

pub async fn summarize(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected summarize request body: {}", rejection.body_text());
        rejection
    })?;

    let summary = state.summarizer.summarize(&request.text).await?;

    Ok(Json(SummaryResponse { summary }))
}
