use std::fs::File;
use std::path::Path;

use crate::*;

/// The result of repairing a single source.
#[derive(Debug)]
pub enum Outcome {
    /// The legitimate content was written to the destination.
    Repaired { extent: Extent, written: u64 },

    /// The terminal box was never found, so nothing was written.
    Skipped(FourCC),

    /// The box structure is broken before the terminal box.
    FailedParse(Error),

    /// Reading the source or writing the destination failed.
    FailedIo(Error),
}

impl Outcome {
    pub fn is_repaired(&self) -> bool {
        matches!(self, Outcome::Repaired { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::FailedParse(_) | Outcome::FailedIo(_))
    }
}

impl From<Error> for Outcome {
    fn from(err: Error) -> Self {
        match err {
            Error::UnresolvedExtent(kind) => Outcome::Skipped(kind),
            err if err.is_parse() => Outcome::FailedParse(err),
            err => Outcome::FailedIo(err),
        }
    }
}

/// Walk, resolve and commit a single source to `dest`.
pub fn repair<S: Source + ?Sized>(source: &mut S, dest: &Path, config: &Config) -> Outcome {
    repair_with(source, dest, config, |_| {})
}

/// Same as [repair], but `on_box` is called for every top-level box before it's resolved.
pub fn repair_with<S, F>(source: &mut S, dest: &Path, config: &Config, on_box: F) -> Outcome
where
    S: Source + ?Sized,
    F: FnMut(&BoxHeader),
{
    match repair_inner(source, dest, config, on_box) {
        Ok((extent, written)) => Outcome::Repaired { extent, written },
        Err(err) => err.into(),
    }
}

/// Open `input` read-only and repair it into `dest`.
pub fn repair_file(input: &Path, dest: &Path, config: &Config) -> Outcome {
    repair_file_with(input, dest, config, |_| {})
}

/// Same as [repair_file], but `on_box` is called for every top-level box before it's resolved.
pub fn repair_file_with<F: FnMut(&BoxHeader)>(input: &Path, dest: &Path, config: &Config, on_box: F) -> Outcome {
    match File::open(input) {
        Ok(mut file) => repair_with(&mut file, dest, config, on_box),
        Err(err) => Outcome::FailedIo(err.into()),
    }
}

fn repair_inner<S, F>(source: &mut S, dest: &Path, config: &Config, mut on_box: F) -> Result<(Extent, u64)>
where
    S: Source + ?Sized,
    F: FnMut(&BoxHeader),
{
    let boxes = Walker::new(&mut *source)?.inspect(|res| {
        if let Ok(header) = res {
            on_box(header)
        }
    });

    let extent = resolve(boxes, config)?;
    let written = commit(source, &extent, dest, config)?;
    Ok((extent, written))
}
