use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;
use yomu_core::{LookupPipeline, PipelineOutput};
use yomu_render::render_entry;
use yomu_types::{AppEvent, DisplayResult, LookupOutcome, PointerEvent};

/// Runs the lookup pipeline for one settled pointer position and sends the
/// outcome, unless `cancel` fires first.
pub async fn handle_lookup(
    generation: u64,
    event: PointerEvent,
    pipeline: &LookupPipeline,
    cancel: &CancellationToken,
    results_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    tracing::debug!(
        "Generation {}: looking up '{}' at {}",
        generation,
        event.sentence,
        event.offset
    );

    let output = tokio::select! {
        output = pipeline.run(&event.sentence, event.offset) => output,
        _ = cancel.cancelled() => {
            tracing::debug!("Generation {} superseded, dropping", generation);
            return Ok(());
        }
    };

    if cancel.is_cancelled() {
        tracing::debug!("Generation {} superseded, dropping", generation);
        return Ok(());
    }

    let outcome = build_outcome(generation, event, &output);
    tracing::debug!(
        "Generation {}: {} candidates, {} results",
        generation,
        outcome.candidates.len(),
        outcome.results.len()
    );

    results_tx.send(AppEvent::ShowResults(outcome)).await?;
    Ok(())
}

pub fn build_outcome(generation: u64, event: PointerEvent, output: &PipelineOutput) -> LookupOutcome {
    let results = output
        .entries
        .iter()
        .map(|entry| {
            let tags = output.tags_for(entry.id);
            DisplayResult {
                entry_id: entry.id,
                term: entry.expression.clone(),
                reading: entry.reading.clone(),
                tags: tags.iter().map(|tag| tag.name.clone()).collect(),
                html: render_entry(entry, tags).to_html(),
            }
        })
        .collect();

    LookupOutcome {
        generation,
        sentence: event.sentence,
        offset: event.offset,
        x: event.x,
        y: event.y,
        candidates: output.candidates.as_slice().to_vec(),
        results,
    }
}
