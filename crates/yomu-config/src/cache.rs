use serde::{Deserialize, Serialize};
use yomu_core::FailurePolicy;

use crate::Lookup;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether a failed fetch is retried or handed to later requests
    pub failures: FailurePolicy,
}

impl CacheConfig {
    pub(crate) fn from_lookup(lookup: &Lookup) -> Self {
        let failures = match lookup("YOMU_CACHE_FAILURES") {
            Some(value) => parse_policy(&value).unwrap_or_else(|| {
                tracing::warn!("Unknown YOMU_CACHE_FAILURES '{}', using retry", value);
                FailurePolicy::default()
            }),
            None => FailurePolicy::default(),
        };

        Self { failures }
    }
}

fn parse_policy(value: &str) -> Option<FailurePolicy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "retry" => Some(FailurePolicy::Retry),
        "remember" => Some(FailurePolicy::Remember),
        _ => None,
    }
}
