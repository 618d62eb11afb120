use std::io::Write;

use kanal::AsyncReceiver;
use yomu_types::{AppEvent, LookupOutcome};

pub mod lookup;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per lookup outcome
    #[default]
    Json,
    /// Rendered entry documents as HTML fragments
    Html,
}

/// Writes lookup outcomes, skipping any that arrive after a newer one was
/// already written.
pub struct OutputStage<W: Write> {
    format: OutputFormat,
    last_applied: Option<u64>,
    out: W,
}

impl<W: Write> OutputStage<W> {
    pub fn new(format: OutputFormat, out: W) -> Self {
        Self {
            format,
            last_applied: None,
            out,
        }
    }

    pub fn last_applied(&self) -> Option<u64> {
        self.last_applied
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Returns false when `outcome` is older than what is already shown.
    pub fn apply(&mut self, outcome: &LookupOutcome) -> anyhow::Result<bool> {
        if self
            .last_applied
            .is_some_and(|last| outcome.generation <= last)
        {
            tracing::debug!(
                "Skipping stale generation {} (showing {:?})",
                outcome.generation,
                self.last_applied
            );
            return Ok(false);
        }

        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, outcome)?;
                writeln!(self.out)?;
            }
            OutputFormat::Html => {
                writeln!(
                    self.out,
                    "<!-- generation {}: {} results -->",
                    outcome.generation,
                    outcome.results.len()
                )?;
                for result in &outcome.results {
                    writeln!(self.out, "{}", result.html)?;
                }
            }
        }
        self.out.flush()?;

        self.last_applied = Some(outcome.generation);
        Ok(true)
    }
}

/// Output loop: shows lookup outcomes until shutdown
pub async fn event_loop<W: Write>(
    results_rx: AsyncReceiver<AppEvent>,
    mut stage: OutputStage<W>,
) -> anyhow::Result<()> {
    tracing::info!("Output loop started");
    loop {
        let Ok(event) = results_rx.recv().await else {
            tracing::debug!("Results channel closed");
            break;
        };

        match event {
            AppEvent::ShowResults(outcome) => {
                if let Err(e) = stage.apply(&outcome) {
                    tracing::error!("Failed to write generation {}: {}", outcome.generation, e);
                }
            }
            AppEvent::Shutdown => {
                tracing::info!("Output loop stopping");
                break;
            }
            AppEvent::Pointer { .. } => {
                tracing::warn!("Output loop received a pointer event, ignoring");
            }
        }
    }

    Ok(())
}
