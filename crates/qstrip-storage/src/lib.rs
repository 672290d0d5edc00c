//! File storage for raw uploads and derived thumbnails.
//!
//! Keys are flat filenames inside a configured base directory; key
//! resolution rejects anything that could escape it.

pub mod local;
pub mod traits;

pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
