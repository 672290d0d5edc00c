//! Upload gatekeeper.
//!
//! Pure checks over already-extracted metadata: declared content type,
//! byte size, and pixel dimensions against configured ceilings. Rules
//! are checked in a fixed order and the first failure wins.

use qstrip_core::{AppError, Config};

use crate::metadata::ImageDimensions;

/// Acceptance rules for one upload, snapshot from config.
#[derive(Clone, Debug)]
pub struct UploadRules {
    max_size_bytes: u64,
    max_width: u32,
    max_height: u32,
    allowed_content_types: Vec<String>,
}

impl UploadRules {
    pub fn new(
        max_size_bytes: u64,
        max_width: u32,
        max_height: u32,
        allowed_content_types: Vec<String>,
    ) -> Self {
        Self {
            max_size_bytes,
            max_width,
            max_height,
            allowed_content_types,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.max_image_size_bytes,
            config.max_image_width,
            config.max_image_height,
            config.allowed_content_types.clone(),
        )
    }

    /// Check the declared MIME type against the accepted image types.
    pub fn validate_content_type(&self, content_type: &str) -> Result<(), AppError> {
        let normalized = content_type.to_lowercase();
        if self
            .allowed_content_types
            .iter()
            .any(|ct| ct == &normalized)
        {
            Ok(())
        } else {
            Err(AppError::UnsupportedFormat(content_type.to_string()))
        }
    }

    /// Gatekeeper proper: size ceiling, then dimension presence, then
    /// dimension ceilings. First failure wins.
    pub fn validate(
        &self,
        size_bytes: u64,
        dimensions: Option<ImageDimensions>,
    ) -> Result<(), AppError> {
        if size_bytes > self.max_size_bytes {
            return Err(AppError::SizeExceeded {
                size: size_bytes,
                max: self.max_size_bytes,
            });
        }

        let dims = match dimensions {
            Some(d) if d.width > 0 && d.height > 0 => d,
            _ => return Err(AppError::UnreadableDimensions),
        };

        if dims.width > self.max_width || dims.height > self.max_height {
            return Err(AppError::DimensionsExceeded {
                width: dims.width,
                height: dims.height,
                max_width: self.max_width,
                max_height: self.max_height,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> UploadRules {
        UploadRules::new(
            500 * 1024,
            1000,
            1000,
            vec!["image/png".to_string(), "image/jpeg".to_string()],
        )
    }

    fn dims(width: u32, height: u32) -> Option<ImageDimensions> {
        Some(ImageDimensions { width, height })
    }

    #[test]
    fn accepts_within_all_ceilings() {
        assert!(rules().validate(50 * 1024, dims(300, 300)).is_ok());
        assert!(rules().validate(500 * 1024, dims(1000, 1000)).is_ok());
    }

    #[test]
    fn size_ceiling_is_checked_first() {
        // Oversize in both byte count and pixels: the size rule wins.
        let err = rules().validate(600 * 1024, dims(1200, 1200)).unwrap_err();
        assert_eq!(err.error_code(), "size_exceeded");
    }

    #[test]
    fn missing_dimensions_rejected_before_ceilings() {
        let err = rules().validate(10, None).unwrap_err();
        assert_eq!(err.error_code(), "unreadable_dimensions");
        let err = rules().validate(10, dims(0, 500)).unwrap_err();
        assert_eq!(err.error_code(), "unreadable_dimensions");
    }

    #[test]
    fn dimension_ceilings_checked_independently_per_axis() {
        let err = rules().validate(10, dims(1200, 300)).unwrap_err();
        assert_eq!(err.error_code(), "dimensions_exceeded");
        let err = rules().validate(10, dims(300, 1200)).unwrap_err();
        assert_eq!(err.error_code(), "dimensions_exceeded");
    }

    #[test]
    fn content_type_allowlist_is_case_insensitive() {
        assert!(rules().validate_content_type("IMAGE/PNG").is_ok());
        assert!(rules().validate_content_type("image/jpeg").is_ok());
        let err = rules().validate_content_type("image/gif").unwrap_err();
        assert_eq!(err.error_code(), "unsupported_format");
        assert!(rules().validate_content_type("text/html").is_err());
    }
}
