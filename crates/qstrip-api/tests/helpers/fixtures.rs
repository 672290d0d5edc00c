//! Image fixtures rendered in-process.

use std::io::Cursor;

use image::{ImageFormat, Luma, Rgb};

/// Render `payload` as a QR symbol into PNG bytes (white quiet zone,
/// 8px modules).
pub fn qr_png(payload: &str) -> Vec<u8> {
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

    encode_png(image::DynamicImage::ImageLuma8(img))
}

/// A featureless PNG with no QR symbol.
pub fn blank_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, Rgb([240u8, 240, 240]));
    encode_png(image::DynamicImage::ImageRgb8(img))
}

fn encode_png(img: image::DynamicImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}
