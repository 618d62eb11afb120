use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use self::cache::CacheConfig;
use self::input::InputConfig;
use self::log::LogConfig;
use self::server::ServerConfig;
use self::tracker::TrackerConfig;

pub mod cache;
pub mod input;
pub mod log;
pub mod server;
pub mod tracker;

pub use self::log::LogFormat;

/// Reads one setting by environment variable name.
pub(crate) type Lookup = dyn Fn(&str) -> Option<String>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub tracker: TrackerConfig,
    pub cache: CacheConfig,
    pub log: LogConfig,
    pub input: InputConfig,
}

impl Config {
    /// Defaults overridden by `YOMU_*` environment variables.
    pub fn new() -> Self {
        Self::from_lookup(&|name: &str| env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: &Lookup) -> Self {
        Config {
            server: ServerConfig::from_lookup(lookup),
            tracker: TrackerConfig::from_lookup(lookup),
            cache: CacheConfig::from_lookup(lookup),
            log: LogConfig::from_lookup(lookup),
            input: InputConfig::from_lookup(lookup),
        }
    }

    /// Applies a JSON config file on top of `self`. Settings the file leaves
    /// out keep their current value.
    pub fn merge_file(self, path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.merge_json(&data)
    }

    pub fn merge_json(self, data: &str) -> Result<Self, ConfigError> {
        let overlay: serde_json::Value = serde_json::from_str(data)?;
        let mut base = serde_json::to_value(&self)?;
        merge_values(&mut base, overlay);
        Ok(serde_json::from_value(base)?)
    }
}

/// Recursively overlays objects; any other value replaces the base.
fn merge_values(base: &mut serde_json::Value, overlay: serde_json::Value) {
    match (base, overlay) {
        (serde_json::Value::Object(base), serde_json::Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
