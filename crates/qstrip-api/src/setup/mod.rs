//! Application setup and initialization
//!
//! Wiring extracted from main.rs: configuration validation, database
//! pool and migrations, storage backend, state construction, routes.

pub mod database;
pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::{Context, Result};
use qstrip_core::Config;
use qstrip_db::SubmissionRepository;
use qstrip_processing::RqrrDecoder;
use qstrip_storage::LocalStorage;

use crate::state::AppState;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    let pool = database::setup_database(&config).await?;
    let repository = SubmissionRepository::new(pool);

    let storage = LocalStorage::new(&config.upload_dir)
        .await
        .with_context(|| format!("Failed to initialize upload directory {}", config.upload_dir))?;

    let state = Arc::new(AppState::new(
        config,
        repository,
        Arc::new(storage),
        Arc::new(RqrrDecoder),
    ));

    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
