mod batch;
mod config;
mod log;

use batch::*;
use config::*;

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    config.log.init()?;

    let summary = Batch::new(config).run().await?;

    tracing::info!(
        repaired = summary.repaired,
        unresolved = summary.unresolved,
        existing = summary.existing,
        failed = summary.failed,
        written = summary.written,
        "done"
    );

    if summary.failed > 0 {
        anyhow::bail!("{} of {} files failed", summary.failed, summary.total());
    }

    Ok(())
}
