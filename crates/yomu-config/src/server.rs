use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Lookup;

fn default_url() -> String {
    "http://localhost:45636".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10000
}

/// Lookup server providing tokenization and dictionary search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl ServerConfig {
    pub(crate) fn from_lookup(lookup: &Lookup) -> Self {
        let url = lookup("YOMU_SERVER_URL")
            .filter(|url| !url.is_empty())
            .unwrap_or_else(default_url);

        let request_timeout_ms = lookup("YOMU_REQUEST_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_request_timeout_ms);

        Self {
            url,
            request_timeout_ms,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
