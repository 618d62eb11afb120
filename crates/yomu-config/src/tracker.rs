use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Lookup;

fn default_debounce_ms() -> u64 {
    150
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Quiescence window before a pointer position is looked up
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl TrackerConfig {
    pub(crate) fn from_lookup(lookup: &Lookup) -> Self {
        let debounce_ms = lookup("YOMU_DEBOUNCE_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_debounce_ms);

        Self { debounce_ms }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
