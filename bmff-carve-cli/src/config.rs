use std::num::NonZeroUsize;
use std::path::PathBuf;

use bmff_carve::FourCC;
use clap::Parser;

use crate::log;

/// Repair ISO BMFF files (CR3, MP4, MOV, HEIF) that have junk appended past their last box.
#[derive(Parser, Clone, Debug)]
#[command(name = "bmff-carve", version)]
pub struct Config {
    /// Directory containing the files to repair.
    #[arg(long, value_name = "INPUT_DIR", value_parser = existing_dir)]
    pub input_dir: PathBuf,

    /// Directory where repaired files are written, created if missing.
    #[arg(long, value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// The last top-level box to include in the output.
    #[arg(long, alias = "lastchunk", value_name = "NAME", default_value = "mdat")]
    pub terminal: FourCC,

    /// Reject files that don't start with an ftyp box.
    #[arg(long)]
    pub require_ftyp: bool,

    /// Replace output files that already exist instead of skipping them.
    #[arg(long)]
    pub overwrite: bool,

    /// The number of files to repair in parallel, defaulting to the number of CPUs.
    #[arg(long, short)]
    pub jobs: Option<NonZeroUsize>,

    /// The log configuration.
    #[command(flatten)]
    pub log: log::Args,
}

impl Config {
    /// The options passed to every repair.
    pub fn carve(&self) -> bmff_carve::Config {
        bmff_carve::Config {
            terminal: self.terminal,
            leading: self.require_ftyp.then_some(bmff_carve::Config::FTYP),
            overwrite: self.overwrite,
        }
    }

    pub fn jobs(&self) -> NonZeroUsize {
        self.jobs
            .or_else(|| std::thread::available_parallelism().ok())
            .unwrap_or(NonZeroUsize::MIN)
    }
}

fn existing_dir(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);

    // Make sure we can enumerate it
    if !path.is_dir() {
        return Err(format!("input path must be an existing directory: {}", path.display()));
    }

    Ok(path)
}
