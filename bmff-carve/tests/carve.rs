use std::fs;
use std::io::Cursor;
use std::path::Path;

use bmff_carve::*;

fn atom(kind: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut buf = ((payload.len() + 8) as u32).to_be_bytes().to_vec();
    buf.extend_from_slice(kind);
    buf.extend_from_slice(payload);
    buf
}

// Roughly what a CR3 looks like at the top level.
fn cr3() -> Vec<u8> {
    let mut data = atom(b"ftyp", b"crx \0\0\0\x01crx isom");
    data.extend(atom(b"moov", &[0x11; 300]));
    data.extend(atom(b"uuid", &[0x22; 64]));
    data.extend(atom(b"mdat", &[0x33; 4096]));
    data
}

fn files(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn concrete_scenario() -> anyhow::Result<()> {
    let mut data = vec![0x00, 0x00, 0x00, 0x10, b'f', b't', b'y', b'p'];
    data.extend([0u8; 8]);
    data.extend([0x00u8, 0x00, 0x00, 0x08, b'm', b'd', b'a', b't']);
    data.extend(b"\xde\xad\xbe\xef and some more junk");

    let mut source = Cursor::new(&data);
    let extent = resolve(Walker::new(&mut source)?, &Config::default())?;
    assert!(extent.found());
    assert_eq!(extent.end, 24);

    let dir = tempfile::tempdir()?;
    let dest = dir.path().join("fixed.mp4");
    let written = commit(&mut source, &extent, &dest, &Config::default())?;

    assert_eq!(written, 24);
    assert_eq!(fs::read(&dest)?, data[..24]);

    Ok(())
}

#[test]
fn junk_is_dropped() -> anyhow::Result<()> {
    let clean = cr3();

    // Junk that happens to look like more boxes, including another mdat.
    let mut data = clean.clone();
    data.extend(atom(b"mdat", &[0x44; 128]));
    data.extend([0xFFu8; 1000]);

    let dir = tempfile::tempdir()?;
    let dest = dir.path().join("IMG_1234.CR3");

    let outcome = repair(&mut Cursor::new(&data), &dest, &Config::default());
    match outcome {
        Outcome::Repaired { written, extent } => {
            assert_eq!(written, clean.len() as u64);
            assert_eq!(extent.terminal.map(|t| t.kind), Some(Config::MDAT));
        }
        outcome => panic!("unexpected outcome: {outcome:?}"),
    }

    assert_eq!(fs::read(&dest)?, clean);
    Ok(())
}

#[test]
fn commit_is_idempotent() -> anyhow::Result<()> {
    let mut data = cr3();
    data.extend([0x55u8; 77]);

    let dir = tempfile::tempdir()?;
    let dest = dir.path().join("out.cr3");

    let mut source = Cursor::new(&data);
    let extent = resolve(Walker::new(&mut source)?, &Config::default())?;

    commit(&mut source, &extent, &dest, &Config::default())?;
    let first = fs::read(&dest)?;
    fs::remove_file(&dest)?;

    commit(&mut source, &extent, &dest, &Config::default())?;
    let second = fs::read(&dest)?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn extended_size_box() -> anyhow::Result<()> {
    let mut data = atom(b"ftyp", b"isom");

    // A wide moov using the 64-bit size.
    data.extend(1u32.to_be_bytes());
    data.extend(b"moov");
    data.extend(40u64.to_be_bytes());
    data.extend([0u8; 24]);

    data.extend(atom(b"mdat", &[9; 10]));
    data.extend([1u8, 2, 3, 4, 5]);

    let mut source = Cursor::new(&data);
    let boxes: Vec<_> = Walker::new(&mut source)?.take(3).collect::<Result<_>>()?;
    assert!(boxes[1].extended);
    assert_eq!(boxes[2].start, 12 + 40);

    let extent = resolve(Walker::new(&mut source)?, &Config::default())?;
    assert_eq!(extent.end, 12 + 40 + 18);
    Ok(())
}

#[test]
fn zero_size_final_box() -> anyhow::Result<()> {
    let mut data = atom(b"ftyp", b"isom");
    data.extend(0u32.to_be_bytes());
    data.extend(b"mdat");
    data.extend([7u8; 333]);

    let mut source = Cursor::new(&data);
    let extent = resolve(Walker::new(&mut source)?, &Config::default())?;

    assert!(extent.terminal.unwrap().to_end);
    assert_eq!(extent.end, data.len() as u64);
    Ok(())
}

#[test]
fn unresolved_writes_nothing() -> anyhow::Result<()> {
    let mut data = atom(b"ftyp", b"isom");
    data.extend(atom(b"moov", &[0; 16]));

    let dir = tempfile::tempdir()?;
    let dest = dir.path().join("out.mp4");

    let mut source = Cursor::new(&data);
    let extent = resolve(Walker::new(&mut source)?, &Config::default())?;
    assert!(!extent.found());

    let err = commit(&mut source, &extent, &dest, &Config::default()).unwrap_err();
    assert!(matches!(err, Error::UnresolvedExtent(_)));
    assert!(files(dir.path()).is_empty());
    Ok(())
}

#[test]
fn truncated_writes_nothing() -> anyhow::Result<()> {
    let mut data = atom(b"ftyp", b"isom");
    data.extend([0u8, 0, 0, 0x10, b'm', b'o']);

    let dir = tempfile::tempdir()?;
    let dest = dir.path().join("out.mp4");

    let outcome = repair(&mut Cursor::new(&data), &dest, &Config::default());
    assert!(matches!(outcome, Outcome::FailedParse(Error::TruncatedHeader { offset: 12, .. })));
    assert!(files(dir.path()).is_empty());
    Ok(())
}

#[test]
fn incomplete_terminal_box() -> anyhow::Result<()> {
    // The mdat claims more bytes than the file has.
    let mut data = cr3();
    data.truncate(data.len() - 100);

    let dir = tempfile::tempdir()?;
    let dest = dir.path().join("out.cr3");

    let outcome = repair(&mut Cursor::new(&data), &dest, &Config::default());
    assert!(matches!(outcome, Outcome::FailedParse(Error::InvalidBoxSize { .. })));
    assert!(files(dir.path()).is_empty());
    Ok(())
}

#[test]
fn concurrent_units_share_directory() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;

    let inputs: Vec<Vec<u8>> = (0..8u8)
        .map(|i| {
            let mut data = cr3();
            data.extend(vec![i; 10 + i as usize]);
            data
        })
        .collect();

    std::thread::scope(|scope| {
        for (i, data) in inputs.iter().enumerate() {
            let dest = dir.path().join(format!("{i}.cr3"));
            scope.spawn(move || {
                let outcome = repair(&mut Cursor::new(data), &dest, &Config::default());
                assert!(outcome.is_repaired(), "{outcome:?}");
            });
        }
    });

    let expected: Vec<String> = (0..8).map(|i| format!("{i}.cr3")).collect();
    assert_eq!(files(dir.path()), expected);

    for i in 0..8 {
        assert_eq!(fs::read(dir.path().join(format!("{i}.cr3")))?, cr3());
    }

    Ok(())
}

#[test]
fn long_file_name() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let name = format!("{}.CR3", "a".repeat(246));
    let dest = dir.path().join(&name);

    let mut data = cr3();
    data.extend([0xEEu8; 64]);

    let outcome = repair(&mut Cursor::new(&data), &dest, &Config::default());
    assert!(outcome.is_repaired(), "{outcome:?}");

    assert_eq!(fs::read(&dest)?, cr3());
    assert_eq!(files(dir.path()), [name]);
    Ok(())
}
