pub mod ingestion;
pub mod query;

pub use ingestion::{IngestionCoordinator, UploadedImage};
pub use query::QueryService;
