//! Read-side queries over the submission store.

use qstrip_core::models::{HistoryEntry, PageResponse, Submission};
use qstrip_core::validation::parse_submission_id;
use qstrip_core::AppError;

use crate::state::AppState;

const EMPTY_PAGE_MESSAGE: &str = "No records found on this page";

pub struct QueryService<'a> {
    state: &'a AppState,
}

impl<'a> QueryService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Recent submissions, newest first, each with an absolute URL for
    /// its thumbnail built from the caller-facing scheme and host.
    #[tracing::instrument(skip(self))]
    pub async fn history(&self, scheme: &str, host: &str) -> Result<Vec<HistoryEntry>, AppError> {
        let submissions = self.state.repository.list_history().await?;
        Ok(submissions
            .into_iter()
            .map(|s| history_entry(s, scheme, host))
            .collect())
    }

    /// One page of submissions, newest first. Page numbers start at 1.
    #[tracing::instrument(skip(self))]
    pub async fn page(&self, page: i64, limit: i64) -> Result<PageResponse, AppError> {
        if page < 1 {
            return Err(AppError::InvalidPagination(format!(
                "page must be a positive integer, got {}",
                page
            )));
        }
        if limit < 1 {
            return Err(AppError::InvalidPagination(format!(
                "limit must be a positive integer, got {}",
                limit
            )));
        }

        let limit_u32 = u32::try_from(limit)
            .map_err(|_| AppError::InvalidPagination(format!("limit {} is out of range", limit)))?;
        let offset_u32 = (page - 1)
            .checked_mul(limit)
            .and_then(|offset| u32::try_from(offset).ok())
            .ok_or_else(|| {
                AppError::InvalidPagination(format!("page {} is out of range", page))
            })?;

        let data = self.state.repository.list_page(limit_u32, offset_u32).await?;
        let message = data
            .is_empty()
            .then(|| EMPTY_PAGE_MESSAGE.to_string());

        Ok(PageResponse {
            data,
            page,
            limit,
            message,
        })
    }

    /// Single submission lookup. A malformed id is its own rejection,
    /// distinct from a well-formed id that matches nothing.
    #[tracing::instrument(skip(self))]
    pub async fn by_id(&self, raw_id: &str) -> Result<Submission, AppError> {
        let id = parse_submission_id(raw_id)?;
        self.state
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("submission {}", id)))
    }
}

fn history_entry(submission: Submission, scheme: &str, host: &str) -> HistoryEntry {
    let filename = std::path::Path::new(&submission.thumbnail_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| submission.thumbnail_path.clone());
    let image_url = (!host.is_empty())
        .then(|| format!("{}://{}/api/test-strips/uploads/{}", scheme, host, filename));

    HistoryEntry {
        id: submission.id,
        payload: submission.payload,
        status: submission.status,
        filename,
        created_at: submission.created_at,
        image_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use qstrip_core::models::StripStatus;
    use uuid::Uuid;

    fn submission(thumbnail_path: &str) -> Submission {
        Submission {
            id: Uuid::now_v7(),
            payload: "ELI-2025-001".to_string(),
            original_image_path: "uploads/a.png".to_string(),
            thumbnail_path: thumbnail_path.to_string(),
            size_bytes: 1024,
            dimensions: "300x300".to_string(),
            status: StripStatus::Valid,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn history_entry_builds_absolute_thumbnail_url() {
        let entry = history_entry(submission("uploads/a-thumb.jpg"), "https", "strips.example.com");
        assert_eq!(entry.filename, "a-thumb.jpg");
        assert_eq!(
            entry.image_url.as_deref(),
            Some("https://strips.example.com/api/test-strips/uploads/a-thumb.jpg")
        );
    }

    #[test]
    fn history_entry_without_host_omits_url() {
        let entry = history_entry(submission("uploads/a-thumb.jpg"), "http", "");
        assert_eq!(entry.image_url, None);
    }
}
