//! Ingestion coordinator.
//!
//! Runs the fixed stage sequence for one uploaded image:
//! format check → retain raw file → dimension probe → gatekeeper →
//! QR extraction → classification → dedup pre-check → thumbnail →
//! insert. The coordinator is the only component with side effects on
//! the raw file: once the file is retained, every failure path (and a
//! dropped request) removes it again, together with a thumbnail that
//! was already derived. The dedup pre-check is advisory; the store's
//! uniqueness constraint is the authoritative duplicate guard.

use std::sync::Arc;

use qstrip_core::models::{NewSubmission, Submission};
use qstrip_core::AppError;
use qstrip_processing::{derive_thumbnail, extract_payload, read_dimensions, thumbnail_filename};
use qstrip_storage::Storage;
use uuid::Uuid;

use crate::error::storage_to_app_error;
use crate::state::AppState;

/// One upload as received from the transport layer.
#[derive(Debug)]
pub struct UploadedImage {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Removes retained files unless disarmed. Cleanup runs on explicit
/// failure and also when the request future is dropped mid-flight, so a
/// disconnecting caller cannot leak raw uploads. Deletion is spawned:
/// best effort, logged, never masking the original failure.
struct RetainedFiles {
    storage: Arc<dyn Storage>,
    raw: Option<String>,
    thumbnail: Option<String>,
}

impl RetainedFiles {
    fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            raw: None,
            thumbnail: None,
        }
    }

    fn disarm(&mut self) {
        self.raw = None;
        self.thumbnail = None;
    }
}

impl Drop for RetainedFiles {
    fn drop(&mut self) {
        for key in [self.raw.take(), self.thumbnail.take()].into_iter().flatten() {
            let storage = self.storage.clone();
            tokio::spawn(async move {
                if let Err(e) = storage.delete(&key).await {
                    tracing::warn!(error = %e, file = %key, "failed to clean up file after aborted ingestion");
                }
            });
        }
    }
}

pub struct IngestionCoordinator<'a> {
    state: &'a AppState,
}

impl<'a> IngestionCoordinator<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Ingest one upload, returning the persisted submission.
    #[tracing::instrument(skip(self, upload), fields(size_bytes = upload.data.len(), content_type = %upload.content_type))]
    pub async fn ingest(&self, upload: UploadedImage) -> Result<Submission, AppError> {
        if upload.data.is_empty() {
            return Err(AppError::InvalidUpload("empty image body".to_string()));
        }

        // Received → FormatChecked. Nothing retained yet, nothing to
        // clean up on failure.
        self.state.rules.validate_content_type(&upload.content_type)?;
        let extension = extension_for(&upload.content_type);
        let size_bytes = upload.data.len() as u64;

        // Retain the raw file under a per-upload unique name.
        let raw_filename = format!("{}.{}", Uuid::now_v7(), extension);
        let original_image_path = self
            .state
            .storage
            .save(&raw_filename, upload.data.clone())
            .await
            .map_err(storage_to_app_error)?;

        let mut retained = RetainedFiles::new(self.state.storage.clone());
        retained.raw = Some(raw_filename.clone());

        let submission = self
            .run_retained_stages(
                upload.data,
                size_bytes,
                &raw_filename,
                original_image_path,
                &mut retained,
            )
            .await?;

        retained.disarm();
        tracing::info!(
            id = %submission.id,
            payload = %submission.payload,
            status = %submission.status,
            "submission accepted"
        );
        Ok(submission)
    }

    /// Stages that run while the raw file is on disk. Any error here
    /// lets the caller's `RetainedFiles` guard remove retained state.
    async fn run_retained_stages(
        &self,
        data: Vec<u8>,
        size_bytes: u64,
        raw_filename: &str,
        original_image_path: String,
        retained: &mut RetainedFiles,
    ) -> Result<Submission, AppError> {
        // FormatChecked → MetadataExtracted
        let dimensions = read_dimensions(data.clone()).await?;

        // MetadataExtracted → SizeValidated
        self.state.rules.validate(size_bytes, Some(dimensions))?;

        // SizeValidated → Decoded. No readable symbol cannot be accepted.
        let payload = extract_payload(self.state.qr_decoder.clone(), data.clone())
            .await?
            .ok_or(AppError::NoQrCode)?;

        // Decoded → Classified (total, cannot fail).
        let status = self.state.classifier.classify(Some(&payload));

        // Classified → DedupChecked. Advisory fast path only; the
        // insert below is the authoritative guard.
        if self.state.repository.exists_by_payload(&payload).await? {
            return Err(AppError::DuplicatePayload(payload));
        }

        // DedupChecked → ThumbnailReady
        let thumbnail = derive_thumbnail(data, self.state.config.thumbnail_size).await?;
        let thumbnail_name = thumbnail_filename(raw_filename);
        let thumbnail_path = self
            .state
            .storage
            .save(&thumbnail_name, thumbnail)
            .await
            .map_err(|e| AppError::Thumbnail(e.to_string()))?;
        retained.thumbnail = Some(thumbnail_name);

        // ThumbnailReady → Persisted
        self.state
            .repository
            .insert(NewSubmission {
                payload,
                original_image_path,
                thumbnail_path,
                size_bytes: size_bytes as i64,
                dimensions: dimensions.to_string(),
                status,
            })
            .await
    }
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type.to_lowercase().as_str() {
        "image/png" => "png",
        _ => "jpg",
    }
}
