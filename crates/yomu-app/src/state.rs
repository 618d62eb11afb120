use std::sync::Arc;

use tokio::sync::RwLock;
use yomu_config::Config;
use yomu_core::LookupPipeline;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    /// Shared by every pointer pipeline so the caches live for the session
    pub pipeline: Arc<LookupPipeline>,
}

impl AppState {
    pub fn new(config: Config, pipeline: LookupPipeline) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            pipeline: Arc::new(pipeline),
        }
    }
}
