//! Forward-only reader with a lookahead window
//!
//! The marker scanner classifies a segment by peeking at its first bytes
//! and then either hands the stream to a segment reader or discards the
//! declared length. `PeekReader` keeps an internal buffer for the
//! lookahead and counts every byte consumed, which gives the absolute
//! stream position the Exif header is stamped with.

use std::io::{self, Read};

/// Default size of the internal buffer (4 KiB)
pub const DEFAULT_BUFFER_SIZE: usize = 4 * 1024;

/// Buffered forward-only reader supporting `peek` and `discard`
pub struct PeekReader<R> {
    inner: R,
    buf: Box<[u8]>,
    start: usize,
    end: usize,
    consumed: u64,
}

impl<R: Read> PeekReader<R> {
    /// Wraps a reader with the default buffer size
    pub fn new(inner: R) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE, inner)
    }

    /// Wraps a reader with a buffer of `capacity` bytes
    ///
    /// The capacity bounds the largest possible peek.
    pub fn with_capacity(capacity: usize, inner: R) -> Self {
        PeekReader {
            inner,
            buf: vec![0u8; capacity.max(1)].into_boxed_slice(),
            start: 0,
            end: 0,
            consumed: 0,
        }
    }

    /// Number of bytes consumed (read or discarded) since construction
    pub fn position(&self) -> u64 {
        self.consumed
    }

    /// Bytes currently buffered
    fn buffered(&self) -> usize {
        self.end - self.start
    }

    /// Returns up to `n` bytes without consuming them
    ///
    /// Fewer than `n` bytes are returned only when the underlying reader is
    /// exhausted or `n` exceeds the buffer capacity.
    pub fn peek(&mut self, n: usize) -> io::Result<&[u8]> {
        let n = n.min(self.buf.len());

        if self.buffered() < n {
            // Compact so the window fits at the front of the buffer
            if self.start > 0 {
                self.buf.copy_within(self.start..self.end, 0);
                self.end -= self.start;
                self.start = 0;
            }

            while self.end < n {
                match self.inner.read(&mut self.buf[self.end..]) {
                    Ok(0) => break,
                    Ok(read) => self.end += read,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            }
        }

        let available = self.buffered().min(n);
        Ok(&self.buf[self.start..self.start + available])
    }

    /// Discards `n` bytes, returning how many were actually skipped
    ///
    /// A short count means the stream ended first.
    pub fn discard(&mut self, n: u64) -> io::Result<u64> {
        if n == 0 {
            return Ok(0);
        }

        let from_buffer = (self.buffered() as u64).min(n) as usize;
        self.start += from_buffer;
        self.consumed += from_buffer as u64;

        let rest = n - from_buffer as u64;
        let skipped = if rest > 0 {
            let skipped = io::copy(&mut (&mut self.inner).take(rest), &mut io::sink())?;
            self.consumed += skipped;
            skipped
        } else {
            0
        };

        Ok(from_buffer as u64 + skipped)
    }

    /// Returns the wrapped reader. Buffered bytes are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for PeekReader<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if out.is_empty() {
            return Ok(0);
        }

        let read = if self.buffered() > 0 {
            let n = self.buffered().min(out.len());
            out[..n].copy_from_slice(&self.buf[self.start..self.start + n]);
            self.start += n;
            n
        } else {
            self.inner.read(out)?
        };

        self.consumed += read as u64;
        Ok(read)
    }
}
