use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use yomu_types::PointerEvent;

use crate::parse_pointer_event;

/// Reads one JSON pointer event per line until end of input.
pub async fn read_events<R, F>(reader: R, mut on_event: F) -> Result<(), anyhow::Error>
where
    R: AsyncBufRead + Unpin,
    F: FnMut(PointerEvent),
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(event) = parse_pointer_event(&line) {
            on_event(event);
        }
    }
    Ok(())
}

pub async fn watch_stdin<F>(on_event: F) -> Result<(), anyhow::Error>
where
    F: FnMut(PointerEvent),
{
    tracing::info!("Reading pointer events from stdin");
    read_events(BufReader::new(tokio::io::stdin()), on_event).await
}
