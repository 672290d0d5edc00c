//! Table-driven status classification.
//!
//! Maps a decoded QR payload to a [`StripStatus`] via ordered prefix
//! rules. The rule table comes from configuration so epoch markers can
//! be rotated without touching the ingestion coordinator.

use crate::config::Config;
use crate::models::StripStatus;

/// Ordered prefix rules; first match wins, no match is `Invalid`.
#[derive(Clone, Debug)]
pub struct StatusClassifier {
    rules: Vec<(String, StripStatus)>,
}

impl StatusClassifier {
    pub fn new(rules: Vec<(String, StripStatus)>) -> Self {
        Self { rules }
    }

    /// Build the rule table from config: valid prefixes first, then
    /// expired. Within each group, config order is preserved.
    pub fn from_config(config: &Config) -> Self {
        let rules = config
            .status_valid_prefixes
            .iter()
            .map(|p| (p.clone(), StripStatus::Valid))
            .chain(
                config
                    .status_expired_prefixes
                    .iter()
                    .map(|p| (p.clone(), StripStatus::Expired)),
            )
            .collect();
        Self { rules }
    }

    /// Classify a decoded payload. Total: every input, including a
    /// missing payload, yields a status.
    pub fn classify(&self, payload: Option<&str>) -> StripStatus {
        let Some(payload) = payload else {
            return StripStatus::Invalid;
        };
        self.rules
            .iter()
            .find(|(prefix, _)| payload.starts_with(prefix.as_str()))
            .map(|(_, status)| *status)
            .unwrap_or(StripStatus::Invalid)
    }
}
