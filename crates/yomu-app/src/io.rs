use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;
use yomu_types::{AppEvent, PointerEvent, TextSource};

use crate::state::AppState;

/// Sending side of the tracker queue. When the queue is full the oldest
/// pointer event is evicted, so the latest position is never the one lost.
#[derive(Clone)]
pub struct PointerQueue {
    tx: AsyncSender<AppEvent>,
    rx: AsyncReceiver<AppEvent>,
}

impl PointerQueue {
    pub fn new(tx: AsyncSender<AppEvent>, rx: AsyncReceiver<AppEvent>) -> Self {
        Self { tx, rx }
    }

    /// Queues a pointer event without blocking the reader.
    pub fn push(&self, event: PointerEvent, source: TextSource) {
        let event = AppEvent::Pointer { event, source };
        // Evicting one event frees a slot for the second attempt
        for _ in 0..2 {
            match self.tx.try_send(event.clone()) {
                Ok(true) => return,
                Ok(false) => match self.rx.try_recv() {
                    Ok(Some(AppEvent::Pointer { event, .. })) => {
                        tracing::warn!("Tracker queue full, dropping pointer at {}", event.offset);
                    }
                    Ok(Some(other)) => {
                        tracing::warn!("Tracker queue full, dropping {:?}", other);
                    }
                    Ok(None) => {}
                    Err(e) => {
                        tracing::error!("Tracker queue closed: {}", e);
                        return;
                    }
                },
                Err(e) => {
                    tracing::error!("Failed to send pointer event to tracker: {}", e);
                    return;
                }
            }
        }
        tracing::warn!("Tracker queue still full, dropping newest pointer event");
    }

    pub async fn shutdown(&self) -> anyhow::Result<()> {
        self.tx.send(AppEvent::Shutdown).await?;
        Ok(())
    }
}

/// Feeds pointer events from the websocket or stdin until the source ends,
/// then asks the tracker to shut down.
pub async fn watcher_io(
    state: Arc<AppState>,
    cancel: CancellationToken,
    queue: PointerQueue,
) -> anyhow::Result<()> {
    let (listen_to_ws, ws_url) = {
        let config = state.config.read().await;
        (config.input.listen_to_ws, config.input.ws_url.clone())
    };

    if listen_to_ws {
        tracing::info!("Starting WebSocket listener on {}", ws_url);

        let sender = queue.clone();
        tokio::select! {
            result = yomu_io::ws::listen_ws(&ws_url, move |event| sender.push(event, TextSource::Websocket)) => {
                if let Err(e) = result {
                    tracing::error!("WebSocket listener error: {}", e);
                }
            }
            _ = cancel.cancelled() => {
                tracing::info!("WebSocket listener stopping");
                return Ok(());
            }
        }
    } else {
        let sender = queue.clone();
        tokio::select! {
            result = yomu_io::stdin::watch_stdin(move |event| sender.push(event, TextSource::Stdin)) => {
                if let Err(e) = result {
                    tracing::error!("Stdin reader error: {}", e);
                }
            }
            _ = cancel.cancelled() => {
                tracing::info!("Stdin reader stopping");
                return Ok(());
            }
        }
    }

    tracing::info!("Input ended");
    queue.shutdown().await
}
