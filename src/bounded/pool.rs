//! A fixed-size pool of [`BoundedFile`] handles over one file.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use super::file::BoundedFile;
use crate::error::{IdentifyError, Result};

/// Upper bound on the number of handles a pool may hold.
pub const MAX_POOL_SIZE: usize = 50;

/// State shared between a pool and the handles it has lent out.
///
/// A slot is `None` until its file is first opened.
#[derive(Debug)]
pub(crate) struct PoolShared {
    path: PathBuf,
    slots: Mutex<Vec<Option<File>>>,
}

impl PoolShared {
    pub(crate) fn give_back(&self, file: Option<File>) {
        let mut slots = self.slots.lock();
        slots.push(file);
        trace!(available = slots.len(), "bounded file returned to pool");
    }
}

/// Hands out up to `count` concurrently bound windows over the same file.
///
/// Each acquired [`BoundedFile`] goes back to the pool when it is released,
/// closed or dropped. Underlying files are opened lazily and reused across
/// acquisitions.
///
/// # Example
///
/// ```no_run
/// use identrs::BoundedFilePool;
///
/// let pool = BoundedFilePool::new("disk.img", 4)?;
/// let boot = pool.acquire(0, 512)?;
/// let table = pool.acquire(512, 1024)?;
/// assert_eq!(pool.available(), 2);
///
/// pool.release(boot)?;
/// drop(table);
/// assert_eq!(pool.available(), 4);
/// # Ok::<(), identrs::IdentifyError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BoundedFilePool {
    shared: Arc<PoolShared>,
}

impl BoundedFilePool {
    /// Creates a pool of `count` handles for `path`.
    ///
    /// Fails with [`IdentifyError::InvalidArgument`] unless
    /// `1 <= count <= 50`. No file is opened until the first acquire.
    pub fn new(path: impl AsRef<Path>, count: usize) -> Result<Self> {
        if count == 0 || count > MAX_POOL_SIZE {
            return Err(IdentifyError::InvalidArgument {
                message: "pool size must be between 1 and 50",
            });
        }
        let slots = std::iter::repeat_with(|| None).take(count).collect();
        Ok(Self {
            shared: Arc::new(PoolShared {
                path: path.as_ref().to_path_buf(),
                slots: Mutex::new(slots),
            }),
        })
    }

    /// Takes an idle handle and binds it to `[start, start + length)`.
    ///
    /// Fails with [`IdentifyError::ResourceExhausted`] when every handle is
    /// in use. If the bind fails the handle stays in the pool.
    pub fn acquire(&self, start: u64, length: u64) -> Result<BoundedFile> {
        let slot = self
            .shared
            .slots
            .lock()
            .pop()
            .ok_or(IdentifyError::ResourceExhausted)?;

        let mut file = BoundedFile::pooled(self.shared.path.clone(), slot, Arc::clone(&self.shared));
        file.bind(start, length)?;
        debug!(start, length, available = self.available(), "bounded file acquired");
        Ok(file)
    }

    /// Returns a handle to the pool, unbinding it first.
    pub fn release(&self, mut file: BoundedFile) -> Result<()> {
        if file.is_bound() {
            file.close()?;
        }
        Ok(())
    }

    /// Number of handles ready to be acquired.
    pub fn available(&self) -> usize {
        self.shared.slots.lock().len()
    }

    /// Closes the underlying files of idle handles. Handles still lent out
    /// are untouched and return to the pool as usual.
    pub fn cleanup(&self) {
        let mut slots = self.shared.slots.lock();
        let mut closed = 0usize;
        for slot in slots.iter_mut() {
            if slot.take().is_some() {
                closed += 1;
            }
        }
        debug!(closed, idle = slots.len(), "bounded file pool cleaned up");
    }

    /// Returns the path every handle reads from.
    pub fn path(&self) -> &Path {
        &self.shared.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};

    fn fixture() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"0123456789abcdefghij").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_invalid_sizes() {
        for count in [0, MAX_POOL_SIZE + 1] {
            assert!(matches!(
                BoundedFilePool::new("unused", count),
                Err(IdentifyError::InvalidArgument { .. })
            ));
        }
        assert!(BoundedFilePool::new("unused", MAX_POOL_SIZE).is_ok());
    }

    #[test]
    fn test_exhaustion_and_release() {
        let fixture = fixture();
        let pool = BoundedFilePool::new(fixture.path(), 2).unwrap();

        let a = pool.acquire(0, 5).unwrap();
        let _b = pool.acquire(5, 5).unwrap();
        assert_eq!(pool.available(), 0);
        assert!(matches!(pool.acquire(10, 5), Err(IdentifyError::ResourceExhausted)));

        pool.release(a).unwrap();
        assert_eq!(pool.available(), 1);
        assert!(pool.acquire(10, 5).is_ok());
    }

    #[test]
    fn test_drop_returns_handle() {
        let fixture = fixture();
        let pool = BoundedFilePool::new(fixture.path(), 1).unwrap();
        {
            let _f = pool.acquire(0, 1).unwrap();
            assert_eq!(pool.available(), 0);
        }
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn test_close_returns_handle_once() {
        let fixture = fixture();
        let pool = BoundedFilePool::new(fixture.path(), 1).unwrap();

        let mut f = pool.acquire(0, 1).unwrap();
        f.close().unwrap();
        assert_eq!(pool.available(), 1);
        drop(f);
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn test_windows_are_independent() {
        let fixture = fixture();
        let pool = BoundedFilePool::new(fixture.path(), 2).unwrap();

        let mut head = pool.acquire(0, 4).unwrap();
        let mut tail = pool.acquire(16, 4).unwrap();

        let mut a = String::new();
        let mut b = String::new();
        head.read_to_string(&mut a).unwrap();
        tail.read_to_string(&mut b).unwrap();
        assert_eq!(a, "0123");
        assert_eq!(b, "ghij");
    }

    #[test]
    fn test_failed_bind_keeps_slot() {
        let dir = tempfile::tempdir().unwrap();
        let pool = BoundedFilePool::new(dir.path().join("missing"), 1).unwrap();

        assert!(matches!(pool.acquire(0, 1), Err(IdentifyError::Io(_))));
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn test_cleanup_keeps_capacity() {
        let fixture = fixture();
        let pool = BoundedFilePool::new(fixture.path(), 2).unwrap();
        drop(pool.acquire(0, 1).unwrap());

        pool.cleanup();
        assert_eq!(pool.available(), 2);

        let mut f = pool.acquire(2, 3).unwrap();
        let mut s = String::new();
        f.read_to_string(&mut s).unwrap();
        assert_eq!(s, "234");
    }
}
