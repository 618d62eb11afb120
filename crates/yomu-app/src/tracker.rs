use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use yomu_core::LookupPipeline;
use yomu_types::{AppEvent, PointerEvent};

use crate::events::lookup::handle_lookup;

/// Starts one lookup per settled pointer position. Starting a lookup
/// cancels the one before it.
struct PointerTracker {
    pipeline: Arc<LookupPipeline>,
    results_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
    current: Option<CancellationToken>,
    generation: u64,
    tasks: JoinSet<anyhow::Result<()>>,
}

impl PointerTracker {
    fn new(
        pipeline: Arc<LookupPipeline>,
        results_tx: AsyncSender<AppEvent>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            pipeline,
            results_tx,
            cancel,
            current: None,
            generation: 0,
            tasks: JoinSet::new(),
        }
    }

    fn start(&mut self, event: PointerEvent) {
        self.generation += 1;
        let generation = self.generation;

        let token = self.cancel.child_token();
        if let Some(previous) = self.current.replace(token.clone()) {
            previous.cancel();
        }

        let pipeline = self.pipeline.clone();
        let results_tx = self.results_tx.clone();
        self.tasks.spawn(async move {
            handle_lookup(generation, event, &pipeline, &token, &results_tx).await
        });
    }

    fn reap(&self, joined: Result<anyhow::Result<()>, tokio::task::JoinError>) {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("Lookup failed: {}", e),
            Err(e) => tracing::error!("Lookup task panicked: {}", e),
        }
    }

    /// Waits for every started lookup.
    async fn drain(&mut self) {
        while let Some(joined) = self.tasks.join_next().await {
            self.reap(joined);
        }
    }
}

/// Debounces pointer events and runs a lookup for each position the pointer
/// rests on for `debounce`.
pub async fn tracker_loop(
    pipeline: Arc<LookupPipeline>,
    debounce: Duration,
    cancel: CancellationToken,
    events_rx: AsyncReceiver<AppEvent>,
    results_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let mut tracker = PointerTracker::new(pipeline, results_tx.clone(), cancel.clone());
    let mut pending: Option<PointerEvent> = None;

    let settle = tokio::time::sleep(debounce);
    tokio::pin!(settle);

    tracing::info!("Tracker started, debounce {:?}", debounce);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Tracker stopping");
                tracker.tasks.abort_all();
                results_tx.send(AppEvent::Shutdown).await?;
                return Ok(());
            }
            event = events_rx.recv() => {
                let event = event.unwrap_or_else(|_| {
                    tracing::debug!("Input channel closed");
                    AppEvent::Shutdown
                });

                match event {
                    AppEvent::Pointer { event, source } => {
                        tracing::debug!("Pointer from {:?}: offset {}", source, event.offset);
                        pending = Some(event);
                        settle.as_mut().reset(Instant::now() + debounce);
                    }
                    AppEvent::Shutdown => {
                        if let Some(event) = pending.take() {
                            tracker.start(event);
                        }
                        tracker.drain().await;
                        tracing::info!("Tracker finished after {} lookups", tracker.generation);
                        results_tx.send(AppEvent::Shutdown).await?;
                        return Ok(());
                    }
                    AppEvent::ShowResults(_) => {
                        tracing::warn!("Tracker received results, ignoring");
                    }
                }
            }
            _ = &mut settle, if pending.is_some() => {
                if let Some(event) = pending.take() {
                    tracker.start(event);
                }
            }
            Some(joined) = tracker.tasks.join_next(), if !tracker.tasks.is_empty() => {
                tracker.reap(joined);
            }
        }
    }
}
