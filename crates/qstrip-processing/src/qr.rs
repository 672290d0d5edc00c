//! QR payload extraction.
//!
//! Decoding is a pluggable dependency behind [`QrDecoder`]. Absence of a
//! readable symbol is an expected business outcome and comes back as
//! `Ok(None)`; only failures to interpret the pixel data at all (which
//! the earlier dimension probe should have ruled out) are faults.

use std::sync::Arc;

use qstrip_core::AppError;

/// Seam for the QR decoding capability.
pub trait QrDecoder: Send + Sync {
    /// Scan encoded image bytes for a QR symbol and return its UTF-8
    /// payload, or `None` when no symbol is found or none decodes.
    fn decode(&self, data: &[u8]) -> Result<Option<String>, AppError>;
}

/// Default decoder backed by the `rqrr` detector.
#[derive(Clone, Copy, Debug, Default)]
pub struct RqrrDecoder;

impl QrDecoder for RqrrDecoder {
    fn decode(&self, data: &[u8]) -> Result<Option<String>, AppError> {
        let luma = image::load_from_memory(data)
            .map_err(|e| AppError::Internal(format!("QR scan could not decode pixels: {}", e)))?
            .to_luma8();

        let mut prepared = rqrr::PreparedImage::prepare(luma);
        let grids = prepared.detect_grids();

        for grid in &grids {
            match grid.decode() {
                Ok((_, content)) => {
                    tracing::debug!(payload = %content, "QR code found");
                    return Ok(Some(content));
                }
                Err(e) => {
                    // A located but unreadable symbol is still "no code".
                    tracing::debug!(error = %e, "QR grid detected but not decodable");
                }
            }
        }

        Ok(None)
    }
}

/// Run a decoder over the image off the async pool; pixel scanning is
/// the most CPU-expensive stage of ingestion.
pub async fn extract_payload(
    decoder: Arc<dyn QrDecoder>,
    data: Vec<u8>,
) -> Result<Option<String>, AppError> {
    tokio::task::spawn_blocking(move || decoder.decode(&data))
        .await
        .map_err(|e| AppError::Internal(format!("QR scan task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Luma};
    use std::io::Cursor;

    /// Render `payload` as a QR symbol into PNG bytes.
    fn qr_png(payload: &str) -> Vec<u8> {
        let code = qrcode::QrCode::new(payload.as_bytes()).unwrap();
        let colors = code.to_colors();
        let modules = code.width() as u32;
        let scale = 8u32;
        let quiet = 4 * scale;
        let side = modules * scale + 2 * quiet;

        let mut img = image::GrayImage::from_pixel(side, side, Luma([255u8]));
        for (i, color) in colors.iter().enumerate() {
            if *color == qrcode::Color::Dark {
                let mx = (i as u32 % modules) * scale + quiet;
                let my = (i as u32 / modules) * scale + quiet;
                for dy in 0..scale {
                    for dx in 0..scale {
                        img.put_pixel(mx + dx, my + dy, Luma([0u8]));
                    }
                }
            }
        }

        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageLuma8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    fn blank_png() -> Vec<u8> {
        let img = image::GrayImage::from_pixel(256, 256, Luma([255u8]));
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageLuma8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn decodes_embedded_payload() {
        let data = qr_png("ELI-2025-ABC");
        let payload = RqrrDecoder.decode(&data).unwrap();
        assert_eq!(payload.as_deref(), Some("ELI-2025-ABC"));
    }

    #[test]
    fn blank_image_yields_none_not_error() {
        assert_eq!(RqrrDecoder.decode(&blank_png()).unwrap(), None);
    }

    #[test]
    fn non_image_bytes_are_a_fault() {
        let err = RqrrDecoder.decode(b"not pixels").unwrap_err();
        assert_eq!(err.error_code(), "internal_error");
    }

    #[tokio::test]
    async fn extract_payload_runs_off_pool() {
        let decoder: Arc<dyn QrDecoder> = Arc::new(RqrrDecoder);
        let payload = extract_payload(decoder, qr_png("ELI-2024-XY")).await.unwrap();
        assert_eq!(payload.as_deref(), Some("ELI-2024-XY"));
    }
}
