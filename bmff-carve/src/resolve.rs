use crate::*;

/// Options for a single repair, passed explicitly to every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// The first top-level box with this kind marks the end of the legitimate content.
    pub terminal: FourCC,

    /// If set, the first top-level box must have this kind.
    pub leading: Option<FourCC>,

    /// Replace an existing destination instead of failing the commit.
    pub overwrite: bool,
}

impl Config {
    pub const MDAT: FourCC = FourCC::new(b"mdat");
    pub const FTYP: FourCC = FourCC::new(b"ftyp");
}

impl Default for Config {
    fn default() -> Self {
        Self {
            terminal: Self::MDAT,
            leading: None,
            overwrite: false,
        }
    }
}

/// Where the legitimate content of a source ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    /// The terminal box, if it was found.
    pub terminal: Option<BoxHeader>,

    /// The end of the terminal box when found.
    /// Otherwise the end of the last box walked, which is informational only.
    pub end: u64,
}

impl Extent {
    pub fn found(&self) -> bool {
        self.terminal.is_some()
    }
}

/// Consume top-level boxes until the terminal box is found.
///
/// Boxes after the first terminal box are never pulled from the iterator.
/// Any parse error is returned as-is; there is no partial result.
pub fn resolve<I>(boxes: I, config: &Config) -> Result<Extent>
where
    I: IntoIterator<Item = Result<BoxHeader>>,
{
    let mut end = 0;

    for (index, header) in boxes.into_iter().enumerate() {
        let header = header?;

        if index == 0 {
            if let Some(expected) = config.leading {
                if header.kind != expected {
                    return Err(Error::UnexpectedBox {
                        expected,
                        found: header.kind,
                    });
                }
            }
        }

        end = header.end();

        if header.kind == config.terminal {
            return Ok(Extent {
                terminal: Some(header),
                end,
            });
        }
    }

    Ok(Extent { terminal: None, end })
}
