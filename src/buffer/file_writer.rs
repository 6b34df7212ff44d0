//! Deferred file writer.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{IdentifyError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Open,
    Closed,
    Deleted,
}

/// A writer that holds data in memory until `threshold` bytes have
/// accumulated, and only then creates its backing file.
///
/// Small outputs that end up discarded through [`delete`](Self::delete)
/// never touch the filesystem. [`close`](Self::close) always leaves a file
/// behind, even an empty one.
///
/// # Example
///
/// ```no_run
/// use std::io::Write;
/// use identrs::ThresholdWriter;
///
/// let mut out = ThresholdWriter::new("carved.bin", 64 * 1024)?;
/// out.write_all(b"small")?;
/// out.close()?;
/// # Ok::<(), identrs::IdentifyError>(())
/// ```
#[derive(Debug)]
pub struct ThresholdWriter {
    path: PathBuf,
    threshold: usize,
    buffer: Vec<u8>,
    file: Option<File>,
    state: State,
}

impl ThresholdWriter {
    /// Creates a writer for `path`. Nothing is created on disk yet.
    ///
    /// Fails with [`IdentifyError::InvalidArgument`] if `threshold` is zero.
    pub fn new(path: impl AsRef<Path>, threshold: usize) -> Result<Self> {
        if threshold == 0 {
            return Err(IdentifyError::InvalidArgument {
                message: "threshold must be > 0",
            });
        }
        Ok(Self {
            path: path.as_ref().to_path_buf(),
            threshold,
            buffer: Vec::with_capacity(threshold),
            file: None,
            state: State::Open,
        })
    }

    /// Buffers `data`, spilling to the file once the threshold is reached.
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.ensure_open("write")?;
        self.buffer.extend_from_slice(data);
        if self.buffer.len() >= self.threshold {
            self.spill()?;
        }
        Ok(data.len())
    }

    /// Writes any buffered bytes to the file, creating it if needed.
    pub fn flush(&mut self) -> Result<()> {
        self.ensure_open("flush")?;
        if !self.buffer.is_empty() {
            self.spill()?;
        }
        Ok(())
    }

    /// Discards buffered data and removes the file if it was created.
    ///
    /// Deleting twice is a no-op. Fails with [`IdentifyError::Closed`]
    /// after [`close`](Self::close).
    pub fn delete(&mut self) -> Result<()> {
        match self.state {
            State::Deleted => return Ok(()),
            State::Closed => return Err(IdentifyError::Closed { op: "delete" }),
            State::Open => {}
        }
        self.state = State::Deleted;
        self.buffer = Vec::new();
        if self.file.take().is_some() {
            fs::remove_file(&self.path)?;
            debug!(path = %self.path.display(), "threshold file deleted");
        }
        Ok(())
    }

    /// Flushes, makes sure the file exists and closes it.
    ///
    /// A no-op after [`delete`](Self::delete). Fails with
    /// [`IdentifyError::Closed`] if already closed.
    pub fn close(&mut self) -> Result<()> {
        match self.state {
            State::Deleted => return Ok(()),
            State::Closed => return Err(IdentifyError::Closed { op: "close" }),
            State::Open => {}
        }
        self.spill()?;
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }
        self.state = State::Closed;
        Ok(())
    }

    /// Returns `true` once the backing file has been created.
    pub fn is_spilled(&self) -> bool {
        self.file.is_some()
    }

    /// Number of bytes held in memory.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_open(&self, op: &'static str) -> Result<()> {
        match self.state {
            State::Open => Ok(()),
            State::Closed | State::Deleted => Err(IdentifyError::Closed { op }),
        }
    }

    fn spill(&mut self) -> Result<()> {
        let file = match self.file.take() {
            Some(file) => file,
            None => {
                trace!(path = %self.path.display(), "creating threshold file");
                File::create(&self.path)?
            }
        };
        let file = self.file.insert(file);
        file.write_all(&self.buffer)?;
        debug!(bytes = self.buffer.len(), "threshold buffer flushed");
        self.buffer.clear();
        Ok(())
    }
}

impl Write for ThresholdWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        ThresholdWriter::write(self, buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        ThresholdWriter::flush(self).map_err(io::Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_threshold() {
        assert!(matches!(
            ThresholdWriter::new("unused", 0),
            Err(IdentifyError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_no_file_below_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        let mut w = ThresholdWriter::new(&path, 8).unwrap();

        w.write(b"1234").unwrap();
        assert!(!w.is_spilled());
        assert!(!path.exists());

        w.write(b"5678").unwrap();
        assert!(w.is_spilled());
        assert_eq!(w.buffered(), 0);
        assert!(path.exists());
    }

    #[test]
    fn test_close_writes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        let mut w = ThresholdWriter::new(&path, 4).unwrap();

        w.write(b"hello world").unwrap();
        w.write(b"!").unwrap();
        w.close().unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"hello world!");
    }

    #[test]
    fn test_close_creates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.bin");
        let mut w = ThresholdWriter::new(&path, 4).unwrap();

        w.close().unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"");
        assert!(matches!(w.close(), Err(IdentifyError::Closed { op: "close" })));
        assert!(matches!(w.write(b"x"), Err(IdentifyError::Closed { op: "write" })));
        assert!(matches!(w.delete(), Err(IdentifyError::Closed { op: "delete" })));
    }

    #[test]
    fn test_delete_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.bin");
        let mut w = ThresholdWriter::new(&path, 2).unwrap();

        w.write(b"abc").unwrap();
        assert!(path.exists());

        w.delete().unwrap();
        assert!(!path.exists());
        w.delete().unwrap();
        w.close().unwrap();
        assert!(!path.exists());
        assert!(matches!(w.write(b"x"), Err(IdentifyError::Closed { op: "write" })));
    }

    #[test]
    fn test_io_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("copy.bin");
        let mut w = ThresholdWriter::new(&path, 16).unwrap();

        let data = vec![7u8; 100];
        io::copy(&mut data.as_slice(), &mut w).unwrap();
        Write::flush(&mut w).unwrap();
        assert_eq!(fs::read(&path).unwrap(), data);
    }
}
