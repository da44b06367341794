use std::io::{Read, Seek, SeekFrom};

/// A seekable byte source: anything that can report its length and read at an offset.
///
/// Implemented for every [Read] + [Seek] type, so files and in-memory cursors both work.
pub trait Source: Read + Seek {
    /// The total length in bytes. The current position is preserved.
    fn size(&mut self) -> std::io::Result<u64> {
        let pos = self.stream_position()?;
        let len = self.seek(SeekFrom::End(0))?;
        if pos != len {
            self.seek(SeekFrom::Start(pos))?;
        }
        Ok(len)
    }

    /// Fill the buffer starting at the given absolute offset.
    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> std::io::Result<()> {
        self.seek(SeekFrom::Start(offset))?;
        self.read_exact(buf)
    }
}

impl<T: Read + Seek + ?Sized> Source for T {}
