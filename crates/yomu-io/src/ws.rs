use futures_util::StreamExt;
use tokio_tungstenite::connect_async;
use yomu_types::PointerEvent;

use crate::parse_pointer_event;

/// Connects to `url` and hands every pointer event received as a text
/// message to `on_event`. Returns when the server closes the connection.
pub async fn listen_ws<F>(url: &str, mut on_event: F) -> Result<(), anyhow::Error>
where
    F: FnMut(PointerEvent) + Send,
{
    let (ws_stream, _) = connect_async(url).await?;
    let (_, mut read) = ws_stream.split();
    tracing::info!("Connected to {}", url);

    while let Some(msg) = read.next().await {
        let msg = msg?;
        if msg.is_close() {
            break;
        }
        if msg.is_text()
            && let Ok(text) = msg.to_text()
            && let Some(event) = parse_pointer_event(text)
        {
            on_event(event);
        }
    }

    tracing::info!("WebSocket {} closed", url);
    Ok(())
}
