//! Thumbnail derivation.
//!
//! Produces a bounded-size JPEG derivative of the original upload for
//! listing UIs. Naming is deterministic from the original's base name so
//! a record's thumbnail can always be located from its raw file.

use std::io::Cursor;
use std::path::Path;

use image::ImageFormat;
use qstrip_core::AppError;

/// Deterministic thumbnail name: `{stem}-thumb.jpg`.
pub fn thumbnail_filename(original_filename: &str) -> String {
    let stem = Path::new(original_filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(original_filename);
    format!("{}-thumb.jpg", stem)
}

/// Re-encode `data` as a JPEG bounded to `size`×`size`, preserving
/// aspect ratio.
pub fn render_thumbnail(data: &[u8], size: u32) -> Result<Vec<u8>, AppError> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::Thumbnail(format!("unreadable source image: {}", e)))?;

    let resized = img.thumbnail(size, size);

    // JPEG has no alpha channel; flatten before encoding.
    let rgb = image::DynamicImage::ImageRgb8(resized.to_rgb8());
    let mut out = Cursor::new(Vec::new());
    rgb.write_to(&mut out, ImageFormat::Jpeg)
        .map_err(|e| AppError::Thumbnail(format!("JPEG encode failed: {}", e)))?;
    Ok(out.into_inner())
}

/// Async wrapper; resize/encode is CPU-bound.
pub async fn derive_thumbnail(data: Vec<u8>, size: u32) -> Result<Vec<u8>, AppError> {
    tokio::task::spawn_blocking(move || render_thumbnail(&data, size))
        .await
        .map_err(|e| AppError::Thumbnail(format!("thumbnail task failed: {}", e)))?
}
