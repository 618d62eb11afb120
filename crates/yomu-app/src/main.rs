use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::signal;
use yomu_client::HttpBackend;
use yomu_core::LookupPipeline;

mod config;
mod controller;
mod events;
mod io;
mod logging;
mod state;
mod tracker;

#[cfg(test)]
mod tests;

use self::config::{Args, load_config};
use self::controller::{AppController, finish_tasks, log_task_result};
use self::events::OutputStage;
use self::state::AppState;

/// How long tasks get to finish after ctrl+c
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

fn main() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run());
    // A pending stdin read would otherwise hold the runtime open
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    result
}

async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let config = load_config(&args)?;

    logging::init_tracing(config.log.format);
    tracing::debug!("Config: {:?}", config);

    let backend = Arc::new(HttpBackend::new(
        config.server.url.clone(),
        config.server.request_timeout(),
    ));
    match backend.check_health().await {
        Ok(()) => tracing::info!("Lookup server at {} is up", backend.base_url()),
        Err(e) => tracing::warn!("Lookup server at {} not reachable: {}", backend.base_url(), e),
    }

    let pipeline = LookupPipeline::from_backend(backend, config.cache.failures);
    let state = Arc::new(AppState::new(config, pipeline));

    let controller = AppController::new(state);
    let mut tasks = controller
        .spawn_tasks(OutputStage::new(args.output, std::io::stdout()))
        .await;

    let shutdown_requested = tokio::select! {
        _ = async {
            while let Some(result) = tasks.join_next().await {
                log_task_result(result);
            }
        } => {
            tracing::info!("All tasks finished");
            false
        }
        result = signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("Failed to listen for ctrl+c: {}", e);
            }
            tracing::info!("Shutdown requested");
            true
        }
    };

    if shutdown_requested {
        controller.shutdown();
        finish_tasks(&mut tasks, SHUTDOWN_GRACE).await;
    }

    Ok(())
}
