use crate::*;

/// Walks the top-level boxes of a source, in order, without reading any payloads.
///
/// Each call to [Iterator::next] reads one header and jumps over the body.
/// The walk ends cleanly when the source is exhausted exactly at a box boundary,
/// or after a box that extends to the end of the source.
/// After an error is yielded, the iterator is finished.
pub struct Walker<'a, S: Source + ?Sized> {
    source: &'a mut S,

    // The offset of the next header.
    offset: u64,

    // The total length of the source, queried once upfront.
    len: u64,

    done: bool,
}

impl<'a, S: Source + ?Sized> Walker<'a, S> {
    /// Start walking from the beginning of the source.
    pub fn new(source: &'a mut S) -> Result<Self> {
        let len = source.size()?;
        Ok(Self {
            source,
            offset: 0,
            len,
            done: false,
        })
    }

    /// The offset where the next header is expected.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// The number of bytes between the cursor and the end of the source.
    pub fn remaining(&self) -> u64 {
        self.len - self.offset
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<S: Source + ?Sized> Iterator for Walker<'_, S> {
    type Item = Result<BoxHeader>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.offset == self.len {
            self.done = true;
            return None;
        }

        match BoxHeader::read_at(&mut *self.source, self.offset, self.len) {
            Ok(header) => {
                // The size was validated against the source, so this never passes the end.
                self.offset = header.end();
                self.done = header.to_end;
                Some(Ok(header))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<S: Source + ?Sized> std::iter::FusedIterator for Walker<'_, S> {}
