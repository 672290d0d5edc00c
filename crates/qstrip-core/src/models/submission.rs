//! Submission domain model and row mapping.
//!
//! `Submission` is the clean domain record; `SubmissionRow` mirrors the
//! persisted relation and is converted at the repository boundary so no
//! loosely-typed row shapes leak upward.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Validity state of a strip, computed once from the decoded payload at
/// acceptance time and never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StripStatus {
    Valid,
    Expired,
    Invalid,
}

impl StripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StripStatus::Valid => "valid",
            StripStatus::Expired => "expired",
            StripStatus::Invalid => "invalid",
        }
    }
}

impl std::fmt::Display for StripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StripStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "valid" => Ok(StripStatus::Valid),
            "expired" => Ok(StripStatus::Expired),
            "invalid" => Ok(StripStatus::Invalid),
            other => Err(AppError::Internal(format!(
                "unknown strip status in store: {}",
                other
            ))),
        }
    }
}

/// One accepted test-strip upload. Immutable after insert.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub id: Uuid,
    pub payload: String,
    pub original_image_path: String,
    pub thumbnail_path: String,
    pub size_bytes: i64,
    /// Rendered as `"WxH"` at acceptance time.
    pub dimensions: String,
    pub status: StripStatus,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by the coordinator for a new record; `id` and
/// `created_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub payload: String,
    pub original_image_path: String,
    pub thumbnail_path: String,
    pub size_bytes: i64,
    pub dimensions: String,
    pub status: StripStatus,
}

/// Raw persisted shape of a submission.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SubmissionRow {
    pub id: String,
    pub payload: String,
    pub original_image_path: String,
    pub thumbnail_path: String,
    pub size_bytes: i64,
    pub dimensions: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl SubmissionRow {
    /// Convert a stored row into the domain record.
    pub fn into_submission(self) -> Result<Submission, AppError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| AppError::Internal(format!("corrupt submission id in store: {}", e)))?;
        let status: StripStatus = self.status.parse()?;
        Ok(Submission {
            id,
            payload: self.payload,
            original_image_path: self.original_image_path,
            thumbnail_path: self.thumbnail_path,
            size_bytes: self.size_bytes,
            dimensions: self.dimensions,
            status,
            created_at: self.created_at,
        })
    }
}

/// Success shape returned to the uploader.
#[derive(Debug, Clone, Serialize)]
pub struct IngestionResponse {
    pub payload: String,
    pub status: StripStatus,
    pub thumbnail_path: String,
    pub size_bytes: i64,
    pub dimensions: String,
    pub processed_at: DateTime<Utc>,
}

impl From<Submission> for IngestionResponse {
    fn from(s: Submission) -> Self {
        IngestionResponse {
            payload: s.payload,
            status: s.status,
            thumbnail_path: s.thumbnail_path,
            size_bytes: s.size_bytes,
            dimensions: s.dimensions,
            processed_at: s.created_at,
        }
    }
}

/// History projection: a submission enriched with an absolute image URL
/// built from the caller's inbound host. The URL is derived per request
/// and never stored.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub payload: String,
    pub status: StripStatus,
    pub filename: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Paginated projection of the store.
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse {
    pub data: Vec<Submission>,
    pub page: i64,
    pub limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
