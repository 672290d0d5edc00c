//! Shared test harness: an app wired to in-memory SQLite and a
//! temporary upload directory, driven through the router.

// Each test binary uses a different subset of the harness.
#![allow(dead_code)]

pub mod fixtures;

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use qstrip_api::setup::routes::setup_routes;
use qstrip_api::state::AppState;
use qstrip_core::Config;
use qstrip_db::SubmissionRepository;
use qstrip_processing::RqrrDecoder;
use qstrip_storage::LocalStorage;
use sqlx::sqlite::SqlitePoolOptions;
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    #[allow(dead_code)]
    pub state: Arc<AppState>,
    pub router: Router,
    upload_dir: TempDir,
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(Config::default()).await
}

pub async fn setup_test_app_with(config: Config) -> TestApp {
    // One connection: each connection to sqlite::memory: is its own
    // database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let migrations = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations");
    sqlx::migrate::Migrator::new(migrations)
        .await
        .unwrap()
        .run(&pool)
        .await
        .unwrap();

    let upload_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(upload_dir.path()).await.unwrap();

    let state = Arc::new(AppState::new(
        config,
        SubmissionRepository::new(pool),
        Arc::new(storage),
        Arc::new(RqrrDecoder),
    ));
    let router = setup_routes(state.clone());

    TestApp {
        state,
        router,
        upload_dir,
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> Response<Body> {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get_with_host(&self, uri: &str, host: &str) -> Response<Body> {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .header(header::HOST, host)
            .body(Body::empty())
            .unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn upload(&self, content_type: &str, data: &[u8]) -> Response<Body> {
        let (boundary, body) = multipart_body("image", "strip.png", content_type, data);
        let request = Request::builder()
            .method("POST")
            .uri("/api/test-strips/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn upload_without_image_field(&self) -> Response<Body> {
        let (boundary, body) = multipart_body("other", "strip.png", "image/png", b"irrelevant");
        let request = Request::builder()
            .method("POST")
            .uri("/api/test-strips/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.upload_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Wait for spawned cleanup tasks to finish removing files.
    pub async fn wait_for_empty_upload_dir(&self) -> bool {
        for _ in 0..50 {
            if self.stored_files().is_empty() {
                return true;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        self.stored_files().is_empty()
    }
}

fn multipart_body(
    field: &str,
    filename: &str,
    content_type: &str,
    data: &[u8],
) -> (String, Vec<u8>) {
    let boundary = "qstrip-test-boundary".to_string();
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    (boundary, body)
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn assert_status(response: &Response<Body>, expected: u16) {
    assert_eq!(
        response.status(),
        StatusCode::from_u16(expected).unwrap(),
        "unexpected status"
    );
}
