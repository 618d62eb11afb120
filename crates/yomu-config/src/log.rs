use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Lookup;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON when stderr is not a terminal, pretty otherwise
    #[default]
    Auto,
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub format: LogFormat,
}

impl LogConfig {
    pub(crate) fn from_lookup(lookup: &Lookup) -> Self {
        let format = lookup("YOMU_LOG_FORMAT")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        Self { format }
    }
}
