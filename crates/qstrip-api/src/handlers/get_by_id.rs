use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use qstrip_core::models::Submission;

use crate::error::HttpAppError;
use crate::services::QueryService;
use crate::state::AppState;

/// Fetch one submission by id. The id arrives as a raw string so a
/// malformed value surfaces as an invalid-id rejection instead of a
/// routing miss.
#[tracing::instrument(skip(state), fields(operation = "get_test_strip"))]
pub async fn get_test_strip(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Submission>, HttpAppError> {
    let submission = QueryService::new(&state).by_id(&id).await?;
    Ok(Json(submission))
}
