use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use bmff_carve::Outcome;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::Config;

/// Totals for a whole batch, aggregated from each file's outcome.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub repaired: usize,
    pub unresolved: usize,
    pub existing: usize,
    pub failed: usize,

    /// Bytes written across all repaired files.
    pub written: u64,
}

impl Summary {
    fn record(&mut self, input: &Path, outcome: Outcome) {
        let name = input.display();

        match outcome {
            Outcome::Repaired { extent, written } => {
                let terminal = extent.terminal.map(|t| t.kind.to_string()).unwrap_or_default();
                tracing::info!(file = %name, %terminal, written, "repaired");

                self.repaired += 1;
                self.written += written;
            }
            Outcome::Skipped(terminal) => {
                tracing::warn!(file = %name, %terminal, "terminal box not found, not saved");
                self.unresolved += 1;
            }
            Outcome::FailedParse(err) => {
                tracing::error!(file = %name, %err, "invalid box structure");
                self.failed += 1;
            }
            Outcome::FailedIo(err) => {
                tracing::error!(file = %name, %err, "failed to save");
                self.failed += 1;
            }
        }
    }

    pub fn total(&self) -> usize {
        self.repaired + self.unresolved + self.existing + self.failed
    }
}

/// Repairs every regular file in the input directory, a few at a time.
pub struct Batch {
    config: Config,
}

impl Batch {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn run(self) -> anyhow::Result<Summary> {
        let output_dir = &self.config.output_dir;
        tokio::fs::create_dir_all(output_dir)
            .await
            .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

        let inputs = self.inputs().await?;
        let carve = self.config.carve();
        let jobs = self.config.jobs().get();

        tracing::info!(input = %self.config.input_dir.display(), files = inputs.len(), jobs, "analyzing");

        let mut summary = Summary::default();

        // Bounds the number of files open at once.
        let permits = Arc::new(Semaphore::new(jobs));
        let mut tasks: JoinSet<(PathBuf, Outcome)> = JoinSet::new();

        for input in inputs {
            let Some(name) = input.file_name() else { continue };
            let output = output_dir.join(name);

            if !self.config.overwrite && tokio::fs::try_exists(&output).await? {
                tracing::warn!(file = %input.display(), output = %output.display(), "output already exists, skipping");
                summary.existing += 1;
                continue;
            }

            // Record finished files while waiting, so the log keeps up with the work.
            let permit = loop {
                tokio::select! {
                    biased;
                    Some(res) = tasks.join_next() => {
                        let (finished, outcome) = res.context("repair task failed")?;
                        summary.record(&finished, outcome);
                    }
                    permit = permits.clone().acquire_owned() => break permit?,
                }
            };

            tasks.spawn_blocking(move || {
                let _permit = permit;
                let outcome = repair(&input, &output, &carve);
                (input, outcome)
            });
        }

        while let Some(res) = tasks.join_next().await {
            let (input, outcome) = res.context("repair task failed")?;
            summary.record(&input, outcome);
        }

        Ok(summary)
    }

    // Regular files only, in name order so runs are reproducible.
    async fn inputs(&self) -> anyhow::Result<Vec<PathBuf>> {
        let input_dir = &self.config.input_dir;
        let mut entries = tokio::fs::read_dir(input_dir)
            .await
            .with_context(|| format!("failed to read input directory: {}", input_dir.display()))?;

        let mut inputs = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();

            if !entry.file_type().await?.is_file() {
                tracing::debug!(path = %path.display(), "skipping non-file");
                continue;
            }

            inputs.push(path);
        }

        inputs.sort();
        Ok(inputs)
    }
}

// Runs on a blocking thread; each call owns its source handle and temporary file.
fn repair(input: &Path, output: &Path, config: &bmff_carve::Config) -> Outcome {
    let span = tracing::debug_span!("repair", file = %input.display());
    let _guard = span.enter();

    bmff_carve::repair_file_with(input, output, config, |header| {
        tracing::debug!(
            kind = %header.kind,
            start = header.start,
            size = header.size,
            extended = header.extended,
            to_end = header.to_end,
            "box"
        );
    })
}
