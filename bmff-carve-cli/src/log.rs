use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Clone, Debug, Default)]
pub struct Args {
    /// Log more, repeat for per-box tracing.
    #[arg(long, short, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log less, repeat to silence everything.
    #[arg(long, short, action = clap::ArgAction::Count, conflicts_with = "verbose")]
    pub quiet: u8,
}

impl Args {
    pub fn level(&self) -> LevelFilter {
        // Default to INFO, go up or down based on -q or -v counts
        match self.verbose {
            0 => match self.quiet {
                0 => LevelFilter::INFO,
                1 => LevelFilter::ERROR,
                _ => LevelFilter::OFF,
            },
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    pub fn init(&self) -> anyhow::Result<()> {
        let filter = EnvFilter::builder()
            .with_default_directive(self.level().into()) // Default to our -q/-v args
            .from_env_lossy(); // Allow overriding with RUST_LOG

        let logger = tracing_subscriber::FmtSubscriber::builder()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .with_target(false)
            .finish();

        tracing::subscriber::set_global_default(logger)?;
        Ok(())
    }
}
