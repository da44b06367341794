use crate::*;

/// A top-level box header, located somewhere in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxHeader {
    /// The name of the box, always 4 bytes.
    pub kind: FourCC,

    /// The absolute offset of the size field.
    pub start: u64,

    /// The size of the box, **including** the header.
    /// Boxes that extend to the end of the source have this resolved to the remaining length.
    pub size: u64,

    /// 8 for the compact form, 16 when the 64-bit size follows the kind.
    pub header_len: u64,

    /// The size field was `1` and the real size was read from the extension.
    pub extended: bool,

    /// The size field was `0`, meaning the box runs until the end of the source.
    pub to_end: bool,
}

impl BoxHeader {
    pub const COMPACT_LEN: u64 = 8;
    pub const EXTENDED_LEN: u64 = 16;

    /// The offset of the first byte after this box.
    pub fn end(&self) -> u64 {
        self.start + self.size
    }

    /// The size of the payload, excluding the header.
    pub fn content_len(&self) -> u64 {
        self.size - self.header_len
    }

    /// Read the header at `offset`, given the total length of the source.
    ///
    /// The box must fit entirely inside the source.
    pub fn read_at<S: Source + ?Sized>(source: &mut S, offset: u64, len: u64) -> Result<Self> {
        let available = len.saturating_sub(offset);
        if available < Self::COMPACT_LEN {
            return Err(Error::TruncatedHeader {
                offset,
                needed: Self::COMPACT_LEN,
                available,
            });
        }

        let mut buf = [0u8; 8];
        source.read_exact_at(offset, &mut buf)?;

        let size = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
        let kind = FourCC::new(&[buf[4], buf[5], buf[6], buf[7]]);

        let (size, header_len, extended, to_end) = match size {
            0 => (available, Self::COMPACT_LEN, false, true),
            1 => {
                if available < Self::EXTENDED_LEN {
                    return Err(Error::TruncatedHeader {
                        offset,
                        needed: Self::EXTENDED_LEN,
                        available,
                    });
                }

                // Read another 8 bytes
                source.read_exact_at(offset + Self::COMPACT_LEN, &mut buf)?;
                (u64::from_be_bytes(buf), Self::EXTENDED_LEN, true, false)
            }
            size => (size as u64, Self::COMPACT_LEN, false, false),
        };

        if size < header_len || size > available {
            return Err(Error::InvalidBoxSize {
                kind,
                offset,
                size,
                available,
            });
        }

        Ok(Self {
            kind,
            start: offset,
            size,
            header_len,
            extended,
            to_end,
        })
    }
}
