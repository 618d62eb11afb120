use std::io::Stdout;
use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use yomu_types::AppEvent;

use crate::events::{OutputStage, event_loop};
use crate::io::{PointerQueue, watcher_io};
use crate::state::AppState;
use crate::tracker::tracker_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub input_to_tracker: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub tracker_to_output: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            input_to_tracker: kanal::bounded_async(256), // pointer bursts
            tracker_to_output: kanal::bounded_async(64),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub async fn spawn_tasks(&self, output: OutputStage<Stdout>) -> JoinSet<anyhow::Result<()>> {
        let debounce = self.state.config.read().await.tracker.debounce();
        let mut tasks = JoinSet::new();

        // Output loop
        tasks.spawn(event_loop(self.channels.tracker_to_output.1.clone(), output));

        // Pointer tracker
        tasks.spawn(tracker_loop(
            self.state.pipeline.clone(),
            debounce,
            self.cancel_token.child_token(),
            self.channels.input_to_tracker.1.clone(),
            self.channels.tracker_to_output.0.clone(),
        ));

        // Watcher IO
        tasks.spawn(watcher_io(
            self.state.clone(),
            self.cancel_token.child_token(),
            PointerQueue::new(
                self.channels.input_to_tracker.0.clone(),
                self.channels.input_to_tracker.1.clone(),
            ),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

/// Waits up to `grace` for the tasks to wind down, then aborts the rest.
pub async fn finish_tasks(tasks: &mut JoinSet<anyhow::Result<()>>, grace: Duration) {
    let drained = tokio::time::timeout(grace, async {
        while let Some(result) = tasks.join_next().await {
            log_task_result(result);
        }
    })
    .await;

    if drained.is_err() {
        tracing::warn!("{} tasks still running after {:?}, aborting", tasks.len(), grace);
        tasks.shutdown().await;
    }
}

pub fn log_task_result(result: Result<anyhow::Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("Task failed: {}", e),
        Err(e) if e.is_cancelled() => {}
        Err(e) => tracing::error!("Task panicked: {}", e),
    }
}
