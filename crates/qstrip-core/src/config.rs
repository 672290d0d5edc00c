//! Configuration module
//!
//! Environment-backed configuration for the ingestion service. Every
//! limit the pipeline enforces (byte ceiling, dimension ceilings,
//! thumbnail geometry) and the classifier prefix tables are set here so
//! the coordinator itself carries no policy constants.

use std::env;

use anyhow::{Context, Result};

// Defaults match the documented acceptance limits.
const DEFAULT_MAX_IMAGE_SIZE_BYTES: u64 = 500 * 1024; // 500 KiB
const DEFAULT_MAX_DIMENSION: u32 = 10_000;
const DEFAULT_THUMBNAIL_SIZE: u32 = 200;
const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_DB_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    /// Directory retaining raw uploads and derived thumbnails.
    pub upload_dir: String,
    pub max_image_size_bytes: u64,
    pub max_image_width: u32,
    pub max_image_height: u32,
    /// Bounding box (square) for derived thumbnails.
    pub thumbnail_size: u32,
    pub allowed_content_types: Vec<String>,
    /// Payload prefixes classified as `valid`, in match order.
    pub status_valid_prefixes: Vec<String>,
    /// Payload prefixes classified as `expired`, in match order.
    pub status_expired_prefixes: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub environment: String,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("invalid {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}

fn env_list(key: &str, default: &[&str]) -> Vec<String> {
    match env::var(key) {
        Ok(raw) => raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Err(_) => default.iter().map(|s| s.to_string()).collect(),
    }
}

impl Config {
    /// Load configuration from the environment (and `.env`, if present).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            server_port: env_parse("SERVER_PORT", DEFAULT_SERVER_PORT)
                .context("SERVER_PORT must be a port number")?,
            database_url: env_or("DATABASE_URL", "sqlite:qstrip.db?mode=rwc"),
            upload_dir: env_or("UPLOAD_DIR", "uploads"),
            max_image_size_bytes: env_parse(
                "MAX_IMAGE_SIZE_BYTES",
                DEFAULT_MAX_IMAGE_SIZE_BYTES,
            )?,
            max_image_width: env_parse("MAX_IMAGE_WIDTH", DEFAULT_MAX_DIMENSION)?,
            max_image_height: env_parse("MAX_IMAGE_HEIGHT", DEFAULT_MAX_DIMENSION)?,
            thumbnail_size: env_parse("THUMBNAIL_SIZE", DEFAULT_THUMBNAIL_SIZE)?,
            allowed_content_types: env_list(
                "ALLOWED_CONTENT_TYPES",
                &["image/png", "image/jpeg"],
            ),
            status_valid_prefixes: env_list("STATUS_VALID_PREFIXES", &["ELI-2025"]),
            status_expired_prefixes: env_list("STATUS_EXPIRED_PREFIXES", &["ELI-2024"]),
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
            db_timeout_seconds: env_parse("DB_TIMEOUT_SECONDS", DEFAULT_DB_TIMEOUT_SECS)?,
            environment: env_or("ENVIRONMENT", "development"),
        };

        config.validate()?;
        Ok(config)
    }

    /// Fail fast on configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_image_size_bytes == 0 {
            anyhow::bail!("MAX_IMAGE_SIZE_BYTES must be positive");
        }
        if self.max_image_width == 0 || self.max_image_height == 0 {
            anyhow::bail!("image dimension ceilings must be positive");
        }
        if self.thumbnail_size == 0 {
            anyhow::bail!("THUMBNAIL_SIZE must be positive");
        }
        if self.allowed_content_types.is_empty() {
            anyhow::bail!("ALLOWED_CONTENT_TYPES must not be empty");
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment.as_str(), "production" | "prod")
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_port: DEFAULT_SERVER_PORT,
            database_url: "sqlite::memory:".to_string(),
            upload_dir: "uploads".to_string(),
            max_image_size_bytes: DEFAULT_MAX_IMAGE_SIZE_BYTES,
            max_image_width: DEFAULT_MAX_DIMENSION,
            max_image_height: DEFAULT_MAX_DIMENSION,
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
            allowed_content_types: vec!["image/png".to_string(), "image/jpeg".to_string()],
            status_valid_prefixes: vec!["ELI-2025".to_string()],
            status_expired_prefixes: vec!["ELI-2024".to_string()],
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            db_timeout_seconds: DEFAULT_DB_TIMEOUT_SECS,
            environment: "test".to_string(),
        }
    }
}
