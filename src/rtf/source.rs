//! Forward-only byte source with one byte of push-back.
//!
//! The source pulls fixed-size chunks from any [`Read`] implementation, so a
//! document never has to be resident as one contiguous buffer.

use super::error::{DecodeError, DecodeResult};
use std::io::{ErrorKind, Read};

/// Smallest chunk the source will allocate.
pub const MIN_CAPACITY: usize = 16;

/// Buffered byte reader used by the lexer.
pub struct ByteSource<R> {
    reader: R,
    /// Chunk buffer
    buf: Box<[u8]>,
    /// Next unread byte in `buf`
    pos: usize,
    /// Number of valid bytes in `buf`
    filled: usize,
    /// Byte handed back by the lexer
    pushed: Option<u8>,
    /// Bytes consumed so far
    offset: u64,
    eof: bool,
}

impl<R: Read> ByteSource<R> {
    /// Create a source with the given chunk capacity.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader,
            buf: vec![0u8; capacity.max(MIN_CAPACITY)].into_boxed_slice(),
            pos: 0,
            filled: 0,
            pushed: None,
            offset: 0,
            eof: false,
        }
    }

    /// Number of bytes consumed so far.
    #[inline]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Next byte, or `None` at end of stream.
    #[inline]
    pub fn next_byte(&mut self) -> DecodeResult<Option<u8>> {
        if let Some(byte) = self.pushed.take() {
            self.offset += 1;
            return Ok(Some(byte));
        }
        if self.pos == self.filled && !self.fill()? {
            return Ok(None);
        }
        let byte = self.buf[self.pos];
        self.pos += 1;
        self.offset += 1;
        Ok(Some(byte))
    }

    /// Give back the byte most recently returned by [`next_byte`](Self::next_byte).
    pub fn push_back(&mut self, byte: u8) -> DecodeResult<()> {
        if self.pushed.is_some() {
            return Err(DecodeError::Assertion("push-back buffer already holds a byte"));
        }
        self.pushed = Some(byte);
        self.offset -= 1;
        Ok(())
    }

    /// Append exactly `count` raw bytes to `out`, bypassing tokenization.
    ///
    /// When `out` is `None` the bytes are consumed and dropped.
    pub fn read_raw(&mut self, mut count: usize, mut out: Option<&mut Vec<u8>>) -> DecodeResult<()> {
        if count > 0
            && let Some(byte) = self.pushed.take()
        {
            self.offset += 1;
            count -= 1;
            if let Some(out) = out.as_deref_mut() {
                out.push(byte);
            }
        }
        while count > 0 {
            if self.pos == self.filled && !self.fill()? {
                return Err(DecodeError::EndOfFile { offset: self.offset });
            }
            let take = count.min(self.filled - self.pos);
            if let Some(out) = out.as_deref_mut() {
                out.extend_from_slice(&self.buf[self.pos..self.pos + take]);
            }
            self.pos += take;
            self.offset += take as u64;
            count -= take;
        }
        Ok(())
    }

    /// Refill the chunk buffer. Returns `false` at end of stream.
    fn fill(&mut self) -> DecodeResult<bool> {
        if self.eof {
            return Ok(false);
        }
        loop {
            match self.reader.read(&mut self.buf) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(false);
                },
                Ok(n) => {
                    self.pos = 0;
                    self.filled = n;
                    return Ok(true);
                },
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_across_chunks() {
        let data: Vec<u8> = (0u8..100).collect();
        let mut source = ByteSource::with_capacity(&data[..], MIN_CAPACITY);
        for expected in 0u8..100 {
            assert_eq!(source.next_byte().unwrap(), Some(expected));
        }
        assert_eq!(source.next_byte().unwrap(), None);
        assert_eq!(source.offset(), 100);
    }

    #[test]
    fn test_push_back_once() {
        let mut source = ByteSource::with_capacity(&b"ab"[..], 64);
        let a = source.next_byte().unwrap().unwrap();
        source.push_back(a).unwrap();
        assert!(matches!(source.push_back(a), Err(DecodeError::Assertion(_))));
        assert_eq!(source.next_byte().unwrap(), Some(b'a'));
        assert_eq!(source.next_byte().unwrap(), Some(b'b'));
    }

    #[test]
    fn test_read_raw() {
        let mut source = ByteSource::with_capacity(&b"xhello world"[..], MIN_CAPACITY);
        let x = source.next_byte().unwrap().unwrap();
        source.push_back(x).unwrap();

        let mut out = Vec::new();
        source.read_raw(6, Some(&mut out)).unwrap();
        assert_eq!(out, b"xhello");
        source.read_raw(1, None).unwrap();
        assert_eq!(source.next_byte().unwrap(), Some(b'w'));

        let err = source.read_raw(10, None).unwrap_err();
        assert!(matches!(err, DecodeError::EndOfFile { offset: 12 }));
    }
}
