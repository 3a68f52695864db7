//! Seekable and random-access reader traits
//!
//! The marker scanner only ever reads forward, while the IFD resolver
//! needs to jump around inside the TIFF block. `ReadAt` is the
//! random-access side of that split.

use std::cell::RefCell;
use std::io::{self, Read, Seek, SeekFrom};

/// Trait for readers that can both read and seek
pub trait SeekableReader: Read + Seek {}

impl<T: Read + Seek> SeekableReader for T {}

/// Random-access reads at absolute offsets
///
/// Implementations fill the whole buffer or fail; a short source yields
/// `UnexpectedEof`.
pub trait ReadAt {
    /// Reads exactly `buf.len()` bytes starting at `offset`
    fn read_exact_at(&self, buf: &mut [u8], offset: u64) -> io::Result<()>;
}

impl ReadAt for [u8] {
    fn read_exact_at(&self, buf: &mut [u8], offset: u64) -> io::Result<()> {
        let start = usize::try_from(offset)
            .map_err(|_| io::Error::new(io::ErrorKind::UnexpectedEof, "offset out of range"))?;
        let end = start
            .checked_add(buf.len())
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "offset out of range"))?;

        match self.get(start..end) {
            Some(src) => {
                buf.copy_from_slice(src);
                Ok(())
            }
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("read of {} bytes at {} exceeds source length {}", buf.len(), offset, self.len()),
            )),
        }
    }
}

impl ReadAt for Vec<u8> {
    fn read_exact_at(&self, buf: &mut [u8], offset: u64) -> io::Result<()> {
        self.as_slice().read_exact_at(buf, offset)
    }
}

impl<T: ReadAt + ?Sized> ReadAt for &T {
    fn read_exact_at(&self, buf: &mut [u8], offset: u64) -> io::Result<()> {
        (**self).read_exact_at(buf, offset)
    }
}

/// Adapts any `Read + Seek` source (a `File`, a `Cursor`) to `ReadAt`
///
/// Each read seeks to the requested offset first, so the wrapped
/// reader's position is not meaningful between calls.
pub struct SeekReadAt<R> {
    inner: RefCell<R>,
}

impl<R: SeekableReader> SeekReadAt<R> {
    pub fn new(inner: R) -> Self {
        SeekReadAt {
            inner: RefCell::new(inner),
        }
    }

    /// Returns the wrapped reader
    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }
}

impl<R: SeekableReader> ReadAt for SeekReadAt<R> {
    fn read_exact_at(&self, buf: &mut [u8], offset: u64) -> io::Result<()> {
        let mut reader = self.inner.try_borrow_mut()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "reader already in use"))?;
        reader.seek(SeekFrom::Start(offset))?;
        reader.read_exact(buf)
    }
}
