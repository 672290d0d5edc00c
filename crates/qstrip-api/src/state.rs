//! Application state.
//!
//! One explicitly constructed state object owns the store handle, the
//! storage backend, the classifier table, and the QR decoder; everything
//! is passed by handle, nothing is process-global.

use std::sync::Arc;

use qstrip_core::{Config, StatusClassifier};
use qstrip_db::SubmissionRepository;
use qstrip_processing::{QrDecoder, UploadRules};
use qstrip_storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub repository: SubmissionRepository,
    pub storage: Arc<dyn Storage>,
    pub classifier: StatusClassifier,
    pub qr_decoder: Arc<dyn QrDecoder>,
    pub rules: UploadRules,
}

impl AppState {
    pub fn new(
        config: Config,
        repository: SubmissionRepository,
        storage: Arc<dyn Storage>,
        qr_decoder: Arc<dyn QrDecoder>,
    ) -> Self {
        let classifier = StatusClassifier::from_config(&config);
        let rules = UploadRules::from_config(&config);
        Self {
            config,
            repository,
            storage,
            classifier,
            qr_decoder,
            rules,
        }
    }
}

#[allow(dead_code)]
fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
