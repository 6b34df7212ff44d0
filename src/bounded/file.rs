//! A file view restricted to one byte window.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::pool::PoolShared;
use crate::error::{IdentifyError, Result};

#[derive(Debug, Clone, Copy)]
struct Window {
    start: u64,
    len: u64,
    pos: u64,
}

impl Window {
    fn remaining(&self) -> u64 {
        self.len.saturating_sub(self.pos)
    }
}

/// A reader over the window `[start, start + length)` of a file, presented as
/// if it were the whole file.
///
/// Reads stop at the window end. Seeks are window-relative: `SeekFrom::End`
/// counts from the window end, and positions before the window start fail
/// with [`IdentifyError::InvalidArgument`]. A position past the window end is
/// allowed and reads as end-of-file.
///
/// A handle starts unbound; any I/O on an unbound handle fails with
/// [`IdentifyError::Closed`]. The underlying file is opened on the first
/// [`bind`](BoundedFile::bind) and kept open across rebinds.
///
/// # Example
///
/// ```no_run
/// use std::io::Read;
/// use identrs::BoundedFile;
///
/// let mut region = BoundedFile::new("disk.img");
/// region.bind(512, 1024)?;
///
/// let mut sector = Vec::new();
/// region.read_to_end(&mut sector)?;
/// assert!(sector.len() <= 1024);
/// # Ok::<(), identrs::IdentifyError>(())
/// ```
#[derive(Debug)]
pub struct BoundedFile {
    path: PathBuf,
    file: Option<File>,
    window: Option<Window>,
    pool: Option<Arc<PoolShared>>,
}

impl BoundedFile {
    /// Creates an unbound handle for `path`. Nothing is opened yet.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file: None,
            window: None,
            pool: None,
        }
    }

    pub(super) fn pooled(path: PathBuf, file: Option<File>, pool: Arc<PoolShared>) -> Self {
        Self {
            path,
            file,
            window: None,
            pool: Some(pool),
        }
    }

    /// Binds the handle to `[start, start + length)`, rebinding if already
    /// bound. The position moves to the window start.
    pub fn bind(&mut self, start: u64, length: u64) -> Result<&mut Self> {
        let file = match self.file.take() {
            Some(file) => file,
            None => File::open(&self.path)?,
        };
        let file = self.file.insert(file);
        file.seek(SeekFrom::Start(start))?;
        self.window = Some(Window {
            start,
            len: length,
            pos: 0,
        });
        Ok(self)
    }

    /// Returns `true` while bound to a window.
    pub fn is_bound(&self) -> bool {
        self.window.is_some()
    }

    /// Returns the window length, if bound.
    pub fn len(&self) -> Option<u64> {
        self.window.map(|w| w.len)
    }

    /// Returns `true` if bound to an empty window.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Returns the path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Unbinds the handle. A pooled handle returns its file to the pool.
    ///
    /// Fails with [`IdentifyError::Closed`] if not bound.
    pub fn close(&mut self) -> Result<()> {
        if self.window.take().is_none() {
            return Err(IdentifyError::Closed { op: "close" });
        }
        if let Some(pool) = self.pool.take() {
            pool.give_back(self.file.take());
        }
        Ok(())
    }

    fn bound(&mut self, op: &'static str) -> Result<(&mut File, &mut Window)> {
        match (self.file.as_mut(), self.window.as_mut()) {
            (Some(file), Some(window)) => Ok((file, window)),
            _ => Err(IdentifyError::Closed { op }),
        }
    }
}

impl Read for BoundedFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let (file, window) = self.bound("read")?;
        let remaining = window.remaining();
        if remaining == 0 || buf.is_empty() {
            return Ok(0);
        }
        let max = buf.len().min(usize::try_from(remaining).unwrap_or(usize::MAX));
        let n = file.read(&mut buf[..max])?;
        window.pos += n as u64;
        Ok(n)
    }
}

impl Seek for BoundedFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let (file, window) = self.bound("seek")?;
        let target = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::Current(delta) => window.pos.checked_add_signed(delta),
            SeekFrom::End(delta) => window.len.checked_add_signed(delta),
        };
        let target = target.ok_or(IdentifyError::InvalidArgument {
            message: "seek to a negative position",
        })?;
        let absolute = window
            .start
            .checked_add(target)
            .ok_or(IdentifyError::InvalidArgument {
                message: "seek position overflows",
            })?;
        let reached = file.seek(SeekFrom::Start(absolute))?;
        window.pos = reached - window.start;
        Ok(window.pos)
    }
}

impl Drop for BoundedFile {
    fn drop(&mut self) {
        if let Some(pool) = self.pool.take() {
            pool.give_back(self.file.take());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn fixture() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let data: Vec<u8> = (0..100u8).collect();
        file.write_all(&data).unwrap();
        file.flush().unwrap();
        file
    }

    fn closed_op(err: &io::Error) -> Option<&'static str> {
        match IdentifyError::from_io(err) {
            Some(IdentifyError::Closed { op }) => Some(op),
            _ => None,
        }
    }

    #[test]
    fn test_reads_stop_at_window_end() {
        let fixture = fixture();
        let mut f = BoundedFile::new(fixture.path());
        f.bind(5, 10).unwrap();

        let mut data = Vec::new();
        f.read_to_end(&mut data).unwrap();
        assert_eq!(data, (5..15u8).collect::<Vec<_>>());

        let mut buf = [0u8; 4];
        assert_eq!(f.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_unbound_fails_with_op() {
        let mut f = BoundedFile::new("does-not-matter");
        let mut buf = [0u8; 4];
        assert_eq!(closed_op(&f.read(&mut buf).unwrap_err()), Some("read"));
        assert_eq!(closed_op(&f.seek(SeekFrom::Start(0)).unwrap_err()), Some("seek"));
        assert!(matches!(f.close(), Err(IdentifyError::Closed { op: "close" })));
    }

    #[test]
    fn test_seek_is_window_relative() {
        let fixture = fixture();
        let mut f = BoundedFile::new(fixture.path());
        f.bind(20, 30).unwrap();

        assert_eq!(f.seek(SeekFrom::Start(4)).unwrap(), 4);
        assert_eq!(f.seek(SeekFrom::Current(2)).unwrap(), 6);
        assert_eq!(f.seek(SeekFrom::End(-10)).unwrap(), 20);

        let mut buf = [0u8; 1];
        f.read_exact(&mut buf).unwrap();
        assert_eq!(buf[0], 40);
    }

    #[test]
    fn test_seek_before_start() {
        let fixture = fixture();
        let mut f = BoundedFile::new(fixture.path());
        f.bind(20, 30).unwrap();

        let err = f.seek(SeekFrom::Current(-1)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        let err = f.seek(SeekFrom::End(-31)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

        // position is unchanged
        assert_eq!(f.seek(SeekFrom::Current(0)).unwrap(), 0);
    }

    #[test]
    fn test_close_then_rebind() {
        let fixture = fixture();
        let mut f = BoundedFile::new(fixture.path());
        f.bind(0, 10).unwrap();
        f.close().unwrap();
        assert!(!f.is_bound());

        f.bind(90, 10).unwrap();
        let mut data = Vec::new();
        f.read_to_end(&mut data).unwrap();
        assert_eq!(data, (90..100u8).collect::<Vec<_>>());
    }

    #[test]
    fn test_window_past_eof() {
        let fixture = fixture();
        let mut f = BoundedFile::new(fixture.path());
        f.bind(95, 10).unwrap();

        let mut data = Vec::new();
        f.read_to_end(&mut data).unwrap();
        assert_eq!(data.len(), 5);
    }

    #[test]
    fn test_bind_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = BoundedFile::new(dir.path().join("missing"));
        assert!(matches!(f.bind(0, 1), Err(IdentifyError::Io(_))));
        assert!(!f.is_bound());
    }
}
