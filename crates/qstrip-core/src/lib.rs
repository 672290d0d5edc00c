//! Core domain types for the test-strip ingestion service.
//!
//! This crate holds everything that is pure and I/O-free: the error
//! taxonomy, configuration, the submission record and its row mapping,
//! the prefix-based status classifier, and input validation helpers.

pub mod classifier;
pub mod config;
pub mod error;
pub mod models;
pub mod validation;

pub use classifier::StatusClassifier;
pub use config::Config;
pub use error::{AppError, LogLevel};
