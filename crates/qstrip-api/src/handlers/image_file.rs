use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use qstrip_core::validation::validate_image_filename;
use qstrip_core::AppError;

use crate::error::{storage_to_app_error, HttpAppError};
use crate::state::AppState;

/// Serve a stored image (raw upload or thumbnail) by filename. The
/// filename is validated before it touches the filesystem; anything
/// that fails the pattern is reported as absent.
#[tracing::instrument(skip(state), fields(operation = "serve_image"))]
pub async fn serve_image(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, HttpAppError> {
    validate_image_filename(&filename)?;

    let data = state
        .storage
        .read(&filename)
        .await
        .map_err(storage_to_app_error)?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(&filename))
        .header(header::CACHE_CONTROL, "public, max-age=31536000, immutable")
        .body(Body::from(data))
        .map_err(|e| AppError::Internal(format!("failed to build response: {}", e)))?;

    Ok(response)
}

fn content_type_for(filename: &str) -> &'static str {
    let lower = filename.to_lowercase();
    if lower.ends_with(".png") {
        "image/png"
    } else {
        "image/jpeg"
    }
}
