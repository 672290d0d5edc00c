use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::HttpAppError;
use crate::services::QueryService;
use crate::state::AppState;

/// Recent submissions, newest first, with absolute thumbnail URLs built
/// from the request's inbound host. The scheme honours a proxy-supplied
/// X-Forwarded-Proto and falls back to plain http.
#[tracing::instrument(skip(state, headers), fields(operation = "test_strip_history"))]
pub async fn test_strip_history(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, HttpAppError> {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");

    let entries = QueryService::new(&state).history(scheme, host).await?;

    if entries.is_empty() {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "No history found." })),
        )
            .into_response());
    }

    Ok(Json(entries).into_response())
}
