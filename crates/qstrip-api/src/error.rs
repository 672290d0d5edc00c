//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`; any
//! `AppError` converts into `HttpAppError` and renders consistently
//! (status, JSON body, logging at the variant's level).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use qstrip_core::{AppError, LogLevel};
use qstrip_storage::StorageError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse.
/// Needed because of the orphan rule: IntoResponse is external and
/// AppError lives in qstrip-core.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(storage_to_app_error(err))
    }
}

/// Storage faults stay opaque; an absent or invalidly named file is a
/// plain not-found to the caller.
pub fn storage_to_app_error(err: StorageError) -> AppError {
    match err {
        StorageError::NotFound(key) => AppError::NotFound(format!("image {}", key)),
        StorageError::InvalidKey(key) => AppError::NotFound(format!("image {}", key)),
        other => AppError::Storage(other.to_string()),
    }
}

fn log_error(error: &AppError) {
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, code = error.error_code(), "request rejected");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, code = error.error_code(), "request degraded");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, code = error.error_code(), "request failed");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .map(|env| {
            let env = env.to_lowercase();
            env == "production" || env == "prod"
        })
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Detail is for development only and never for sensitive faults.
        let details = if is_production_env() || app_error.is_sensitive() {
            None
        } else {
            Some(app_error.to_string())
        };

        let body = Json(ErrorResponse {
            error: app_error.client_message(),
            code: app_error.error_code().to_string(),
            details,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_not_found_becomes_not_found() {
        let err = storage_to_app_error(StorageError::NotFound("a.png".into()));
        assert_eq!(err.error_code(), "not_found");
        assert_eq!(err.http_status_code(), 404);
    }

    #[test]
    fn invalid_key_is_indistinguishable_from_absent() {
        let err = storage_to_app_error(StorageError::InvalidKey("../x.png".into()));
        assert_eq!(err.http_status_code(), 404);
    }

    #[test]
    fn write_failure_is_an_opaque_storage_fault() {
        let err = storage_to_app_error(StorageError::WriteFailed("/srv/uploads: full".into()));
        assert_eq!(err.error_code(), "storage_error");
        assert!(!err.client_message().contains("/srv/uploads"));
    }

    #[test]
    fn error_response_shape() {
        let response = ErrorResponse {
            error: "No QR code detected in image".to_string(),
            code: "no_qr_code".to_string(),
            details: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], "no_qr_code");
        assert!(json.get("details").is_none());
    }
}
