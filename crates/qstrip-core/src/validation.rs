//! Input validation helpers for externally supplied identifiers.

use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

use crate::error::AppError;

/// Restrictive filename pattern for anything used to resolve a
/// filesystem path: alphanumeric, dot, dash, underscore, with a
/// whitelisted image extension. Rejects separators outright, so path
/// traversal sequences cannot be expressed.
static FILENAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._-]+\.(?i:jpg|jpeg|png)$").expect("filename regex is valid")
});

/// Validate an externally supplied image filename before it is used to
/// resolve a storage path.
pub fn validate_image_filename(filename: &str) -> Result<(), AppError> {
    if FILENAME_RE.is_match(filename) {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("image {}", filename)))
    }
}

/// Parse a submission id, distinguishing malformed ids from ids that
/// are well-formed but absent.
pub fn parse_submission_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_image_filenames() {
        assert!(validate_image_filename("0198c1a2-thumb.jpg").is_ok());
        assert!(validate_image_filename("scan_01.PNG").is_ok());
        assert!(validate_image_filename("a-b_c.jpeg").is_ok());
    }

    #[test]
    fn rejects_traversal_and_foreign_extensions() {
        assert!(validate_image_filename("../../etc/passwd").is_err());
        assert!(validate_image_filename("..%2f..%2fetc").is_err());
        assert!(validate_image_filename("shell.sh").is_err());
        assert!(validate_image_filename("noextension").is_err());
        assert!(validate_image_filename("").is_err());
        assert!(validate_image_filename("dir/strip.png").is_err());
    }

    #[test]
    fn malformed_id_is_distinct_from_not_found() {
        let err = parse_submission_id("not-a-uuid").unwrap_err();
        assert_eq!(err.error_code(), "invalid_id");
        assert!(parse_submission_id(&Uuid::now_v7().to_string()).is_ok());
    }
}
