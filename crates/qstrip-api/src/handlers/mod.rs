pub mod get_by_id;
pub mod history;
pub mod image_file;
pub mod list;
pub mod upload;

use axum::Json;
use serde_json::{json, Value};

/// Liveness probe.
pub async fn root() -> Json<Value> {
    Json(json!({
        "service": "qstrip",
        "status": "ok",
    }))
}
