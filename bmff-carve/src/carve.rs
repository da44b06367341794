use std::io::{self, Read, SeekFrom, Write};
use std::path::Path;

use crate::*;

/// Copy `[0, extent.end)` from the source to `dest`, atomically.
///
/// The bytes are written to a uniquely named temporary file next to `dest` and only renamed into place once
/// everything was copied and synced. On any failure the temporary file is removed and `dest` is untouched.
/// Returns the number of bytes written.
pub fn commit<S: Source + ?Sized>(source: &mut S, extent: &Extent, dest: &Path, config: &Config) -> Result<u64> {
    if !extent.found() {
        return Err(Error::UnresolvedExtent(config.terminal));
    }

    // Same directory, so the rename never crosses a filesystem.
    let dir = match dest.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let prefix = match dest.file_name() {
        Some(name) => format!(".{}.", truncate(&name.to_string_lossy(), PREFIX_NAME_MAX)),
        None => ".carve.".to_string(),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(Error::Carve)?;

    // Dropping `temp` deletes the file, which covers every early return below.
    copy(source, extent.end, temp.as_file_mut()).map_err(Error::Carve)?;

    let persisted = if config.overwrite {
        temp.persist(dest)
    } else {
        temp.persist_noclobber(dest)
    };

    // The error owns the temporary file; dropping it removes the file.
    persisted.map_err(|err| Error::Commit(err.error))?;

    Ok(extent.end)
}

// The random part and suffix add another 12 bytes, which must still fit in NAME_MAX (255).
const PREFIX_NAME_MAX: usize = 200;

fn truncate(name: &str, max: usize) -> &str {
    let mut end = name.len().min(max);
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

fn copy<S: Source + ?Sized>(source: &mut S, len: u64, out: &mut std::fs::File) -> io::Result<()> {
    source.seek(SeekFrom::Start(0))?;

    let written = io::copy(&mut (&mut *source).take(len), out)?;
    if written != len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("source ended early: expected={len} copied={written}"),
        ));
    }

    out.flush()?;
    out.sync_all()
}
