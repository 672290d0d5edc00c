use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use qstrip_core::models::PageResponse;
use serde::Deserialize;

use crate::error::HttpAppError;
use crate::services::QueryService;
use crate::state::AppState;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<i64>,
    limit: Option<i64>,
}

/// Paginated listing of submissions, newest first.
#[tracing::instrument(skip(state), fields(operation = "list_test_strips"))]
pub async fn list_test_strips(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse>, HttpAppError> {
    let page = query.page.unwrap_or(DEFAULT_PAGE);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

    let response = QueryService::new(&state).page(page, limit).await?;
    Ok(Json(response))
}
