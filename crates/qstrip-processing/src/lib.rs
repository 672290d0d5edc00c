//! Image-side stages of the ingestion pipeline: the upload gatekeeper,
//! pixel dimension probing, QR payload extraction, and thumbnail
//! derivation. All pixel-scanning work is CPU-bound and is dispatched
//! via `tokio::task::spawn_blocking` so one large image cannot stall
//! unrelated in-flight requests.

pub mod metadata;
pub mod qr;
pub mod thumbnail;
pub mod validator;

pub use metadata::{read_dimensions, ImageDimensions};
pub use qr::{extract_payload, QrDecoder, RqrrDecoder};
pub use thumbnail::{derive_thumbnail, thumbnail_filename};
pub use validator::UploadRules;
