//! Pixel dimension probing.

use std::io::Cursor;

use image::ImageReader;
use qstrip_core::AppError;

/// Pixel geometry of an uploaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for ImageDimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Probe width and height from encoded bytes.
///
/// Any decode failure is reported as `UnreadableDimensions`: the bytes
/// were declared to be an image but their geometry cannot be read.
pub fn probe_dimensions(data: &[u8]) -> Result<ImageDimensions, AppError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|_| AppError::UnreadableDimensions)?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|_| AppError::UnreadableDimensions)?;
    if width == 0 || height == 0 {
        return Err(AppError::UnreadableDimensions);
    }
    Ok(ImageDimensions { width, height })
}

/// Async wrapper: image decode is CPU-bound, run it off the async pool.
pub async fn read_dimensions(data: Vec<u8>) -> Result<ImageDimensions, AppError> {
    tokio::task::spawn_blocking(move || probe_dimensions(&data))
        .await
        .map_err(|e| AppError::Internal(format!("dimension probe task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([240, 240, 240]));
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn probes_png_geometry() {
        let dims = probe_dimensions(&png_bytes(300, 150)).unwrap();
        assert_eq!(dims, ImageDimensions { width: 300, height: 150 });
        assert_eq!(dims.to_string(), "300x150");
    }

    #[test]
    fn garbage_bytes_are_unreadable() {
        let err = probe_dimensions(b"definitely not an image").unwrap_err();
        assert_eq!(err.error_code(), "unreadable_dimensions");
    }

    #[test]
    fn truncated_image_is_unreadable() {
        let mut data = png_bytes(64, 64);
        data.truncate(10);
        assert!(probe_dimensions(&data).is_err());
    }

    #[tokio::test]
    async fn async_wrapper_matches_sync_probe() {
        let data = png_bytes(20, 40);
        let dims = read_dimensions(data.clone()).await.unwrap();
        assert_eq!(dims, probe_dimensions(&data).unwrap());
    }
}
