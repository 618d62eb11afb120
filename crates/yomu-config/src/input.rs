use serde::{Deserialize, Serialize};

use crate::Lookup;

fn default_ws_url() -> String {
    "ws://localhost:8080".to_string()
}

/// Where pointer events come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Listen to websocket, if false read JSON lines from stdin
    pub listen_to_ws: bool,
    /// WebSocket URL to connect to
    #[serde(default = "default_ws_url")]
    pub ws_url: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            listen_to_ws: false,
            ws_url: default_ws_url(),
        }
    }
}

impl InputConfig {
    pub(crate) fn from_lookup(lookup: &Lookup) -> Self {
        let listen_to_ws = lookup("YOMU_LISTEN_TO_WS")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let ws_url = lookup("YOMU_WS_URL")
            .filter(|url| !url.is_empty())
            .unwrap_or_else(default_ws_url);

        Self {
            listen_to_ws,
            ws_url,
        }
    }
}
