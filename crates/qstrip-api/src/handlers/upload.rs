use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use qstrip_core::models::IngestionResponse;
use qstrip_core::AppError;

use crate::error::HttpAppError;
use crate::services::{IngestionCoordinator, UploadedImage};
use crate::state::AppState;

const IMAGE_FIELD: &str = "image";

/// Accept one test-strip photo from a multipart form and run it through
/// the ingestion pipeline.
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_test_strip"))]
pub async fn upload_test_strip(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<IngestionResponse>, HttpAppError> {
    let mut upload: Option<UploadedImage> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidUpload(format!("malformed multipart body: {}", e)))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let content_type = field
            .content_type()
            .map(|ct| ct.to_string())
            .unwrap_or_default();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidUpload(format!("failed to read image field: {}", e)))?;

        upload = Some(UploadedImage {
            data: data.to_vec(),
            content_type,
        });
        break;
    }

    let upload = upload
        .ok_or_else(|| AppError::InvalidUpload("missing multipart field 'image'".to_string()))?;

    let submission = IngestionCoordinator::new(&state).ingest(upload).await?;

    Ok(Json(IngestionResponse::from(submission)))
}
