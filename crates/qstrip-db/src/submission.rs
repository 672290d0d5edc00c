//! Submission repository.
//!
//! Owns all SQL for the `submissions` relation and converts rows into
//! domain records at the boundary. Insert is a single atomic append;
//! payload uniqueness is enforced by the schema, and a unique violation
//! here is the authoritative duplicate signal regardless of what any
//! earlier advisory check saw.

use chrono::Utc;
use qstrip_core::models::{NewSubmission, Submission, SubmissionRow};
use qstrip_core::AppError;
use sqlx::SqlitePool;
use uuid::Uuid;

const SELECT_COLUMNS: &str = "id, payload, original_image_path, thumbnail_path, \
     size_bytes, dimensions, status, created_at";

#[derive(Clone)]
pub struct SubmissionRepository {
    pool: SqlitePool,
}

impl SubmissionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Append one accepted submission; assigns the id (time-sortable)
    /// and `created_at`.
    #[tracing::instrument(skip(self, new), fields(db.table = "submissions", db.operation = "insert"))]
    pub async fn insert(&self, new: NewSubmission) -> Result<Submission, AppError> {
        let id = Uuid::now_v7();
        let created_at = Utc::now();

        let result = sqlx::query(
            "INSERT INTO submissions ( \
                id, payload, original_image_path, thumbnail_path, \
                size_bytes, dimensions, status, created_at \
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(id.to_string())
        .bind(&new.payload)
        .bind(&new.original_image_path)
        .bind(&new.thumbnail_path)
        .bind(new.size_bytes)
        .bind(&new.dimensions)
        .bind(new.status.as_str())
        .bind(created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(Submission {
                id,
                payload: new.payload,
                original_image_path: new.original_image_path,
                thumbnail_path: new.thumbnail_path,
                size_bytes: new.size_bytes,
                dimensions: new.dimensions,
                status: new.status,
                created_at,
            }),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::DuplicatePayload(new.payload))
            }
            Err(e) => Err(AppError::Database(e)),
        }
    }

    #[tracing::instrument(skip(self), fields(db.table = "submissions", db.operation = "select"))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Submission>, AppError> {
        let row: Option<SubmissionRow> = sqlx::query_as(
            "SELECT id, payload, original_image_path, thumbnail_path, \
                    size_bytes, dimensions, status, created_at \
             FROM submissions WHERE id = ?1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(SubmissionRow::into_submission).transpose()
    }

    /// Advisory dedup fast path. The schema constraint remains the
    /// authoritative guard under concurrency.
    #[tracing::instrument(skip(self, payload), fields(db.table = "submissions", db.operation = "exists"))]
    pub async fn exists_by_payload(&self, payload: &str) -> Result<bool, AppError> {
        let found: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM submissions WHERE payload = ?1)")
                .bind(payload)
                .fetch_one(&self.pool)
                .await?;
        Ok(found != 0)
    }

    /// Full chronological history, newest first.
    #[tracing::instrument(skip(self), fields(db.table = "submissions", db.operation = "select"))]
    pub async fn list_history(&self) -> Result<Vec<Submission>, AppError> {
        let rows: Vec<SubmissionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM submissions ORDER BY created_at DESC, id DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(SubmissionRow::into_submission)
            .collect()
    }

    /// One page of history, newest first. Callers validate pagination
    /// parameters; this takes already-checked values.
    #[tracing::instrument(skip(self), fields(db.table = "submissions", db.operation = "select"))]
    pub async fn list_page(&self, limit: u32, offset: u32) -> Result<Vec<Submission>, AppError> {
        let rows: Vec<SubmissionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM submissions ORDER BY created_at DESC, id DESC \
             LIMIT ?1 OFFSET ?2",
            SELECT_COLUMNS
        ))
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(SubmissionRow::into_submission)
            .collect()
    }
}
