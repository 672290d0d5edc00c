//! Error types module
//!
//! All failures surfaced by the ingestion pipeline and the query surface
//! are unified under the [`AppError`] enum. Each variant knows its HTTP
//! status, a machine-readable code, the log level it should be reported
//! at, and whether its detail is safe to show to callers.

use std::io;

use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected rejections: validation failures, duplicates, bad ids
    Debug,
    /// Recoverable or suspicious conditions
    Warn,
    /// Unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unsupported file format: {0}. Only JPEG and PNG are allowed")]
    UnsupportedFormat(String),

    #[error("Unable to read image dimensions")]
    UnreadableDimensions,

    #[error("Image size {size} bytes exceeds the {max} byte limit")]
    SizeExceeded { size: u64, max: u64 },

    #[error("Image dimensions {width}x{height} exceed {max_width}x{max_height} pixels")]
    DimensionsExceeded {
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("No QR code detected in image")]
    NoQrCode,

    #[error("Duplicate QR payload: {0}")]
    DuplicatePayload(String),

    #[error("Invalid submission id: {0}")]
    InvalidId(String),

    #[error("Invalid pagination parameters: {0}")]
    InvalidPagination(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Thumbnail generation failed: {0}")]
    Thumbnail(String),

    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code this error renders as.
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::UnsupportedFormat(_)
            | AppError::UnreadableDimensions
            | AppError::SizeExceeded { .. }
            | AppError::DimensionsExceeded { .. }
            | AppError::InvalidUpload(_)
            | AppError::InvalidId(_)
            | AppError::InvalidPagination(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::DuplicatePayload(_) => 409,
            AppError::NoQrCode => 422,
            AppError::Thumbnail(_)
            | AppError::Database(_)
            | AppError::Storage(_)
            | AppError::Internal(_) => 500,
        }
    }

    /// Machine-readable error code for programmatic handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::UnsupportedFormat(_) => "unsupported_format",
            AppError::UnreadableDimensions => "unreadable_dimensions",
            AppError::SizeExceeded { .. } => "size_exceeded",
            AppError::DimensionsExceeded { .. } => "dimensions_exceeded",
            AppError::InvalidUpload(_) => "invalid_upload",
            AppError::NoQrCode => "no_qr_code",
            AppError::DuplicatePayload(_) => "duplicate_payload",
            AppError::InvalidId(_) => "invalid_id",
            AppError::InvalidPagination(_) => "invalid_pagination",
            AppError::NotFound(_) => "not_found",
            AppError::Thumbnail(_) => "thumbnail_error",
            AppError::Database(_) => "database_error",
            AppError::Storage(_) => "storage_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Whether internal detail must be hidden from the caller.
    ///
    /// Infrastructure faults carry paths and driver messages; those never
    /// cross the API boundary.
    pub fn is_sensitive(&self) -> bool {
        matches!(
            self,
            AppError::Thumbnail(_)
                | AppError::Database(_)
                | AppError::Storage(_)
                | AppError::Internal(_)
        )
    }

    /// Client-facing message. Sensitive variants get an opaque summary.
    pub fn client_message(&self) -> String {
        if self.is_sensitive() {
            "Failed to process request. Please try again later.".to_string()
        } else {
            self.to_string()
        }
    }

    /// Log level for this error.
    ///
    /// Caller-fault rejections and duplicate conflicts are expected
    /// outcomes and log at debug; faults log at error.
    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::UnsupportedFormat(_)
            | AppError::UnreadableDimensions
            | AppError::SizeExceeded { .. }
            | AppError::DimensionsExceeded { .. }
            | AppError::InvalidUpload(_)
            | AppError::NoQrCode
            | AppError::DuplicatePayload(_)
            | AppError::InvalidId(_)
            | AppError::InvalidPagination(_)
            | AppError::NotFound(_) => LogLevel::Debug,
            AppError::Thumbnail(_)
            | AppError::Database(_)
            | AppError::Storage(_)
            | AppError::Internal(_) => LogLevel::Error,
        }
    }
}

impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidId(err.to_string())
    }
}
