//! File reader that remembers what it read.

use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use bytes::Bytes;
use tracing::trace;

use super::BoundedCache;
use crate::error::{IdentifyError, Result};
use crate::gzip::ReadReset;

/// A file reader that tees everything it reads into a [`BoundedCache`].
///
/// After a first pass (typically through an [`Identifier`](crate::Identifier)),
/// [`CachedFile::new_reader`] hands back a source for a second pass: the cached
/// bytes if the whole read fit in the cache, otherwise the file itself rewound
/// to the start.
#[derive(Debug)]
pub struct CachedFile {
    cache: BoundedCache,
    file: Option<File>,
}

impl CachedFile {
    /// Opens `path` with a cache of `capacity` bytes.
    pub fn open(path: impl AsRef<Path>, capacity: u64) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            cache: BoundedCache::new(capacity),
            file: Some(file),
        })
    }

    /// Creates a reader with no file open.
    pub fn new(capacity: u64) -> Self {
        Self {
            cache: BoundedCache::new(capacity),
            file: None,
        }
    }

    /// Opens `path`.
    ///
    /// Fails with [`IdentifyError::AlreadyOpen`] if a file is already open.
    pub fn open_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        if self.file.is_some() {
            return Err(IdentifyError::AlreadyOpen);
        }
        self.file = Some(File::open(path)?);
        Ok(())
    }

    /// Returns `true` if a file is open.
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Returns the cache of what has been read so far.
    pub fn cache(&self) -> &BoundedCache {
        &self.cache
    }

    /// Returns a source positioned at the start of the data.
    ///
    /// The file is given up either way: reading from `self` afterwards fails
    /// with [`IdentifyError::Closed`] until another file is opened.
    pub fn new_reader(&mut self) -> Result<CachedSource> {
        let mut file = self.file.take().ok_or(IdentifyError::Closed { op: "new_reader" })?;

        if self.cache.is_cached() {
            trace!(size = self.cache.size(), "serving second pass from cache");
            drop(file);
            return Ok(CachedSource::Cached(Cursor::new(self.cache.to_bytes())));
        }

        file.rewind()?;
        Ok(CachedSource::File(file))
    }

    /// Clears the cache and closes the file, if any.
    pub fn reset(&mut self) {
        self.cache.reset();
        self.file = None;
    }
}

impl Read for CachedFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let file = self
            .file
            .as_mut()
            .ok_or(IdentifyError::Closed { op: "read" })?;
        let n = file.read(buf)?;
        self.cache.write_bytes(&buf[..n]);
        Ok(n)
    }
}

/// A source handed back by [`CachedFile::new_reader`].
///
/// Both variants read the same bytes from the start; only where they come
/// from differs.
#[derive(Debug)]
pub enum CachedSource {
    /// The data, served from memory.
    Cached(Cursor<Bytes>),
    /// The original file, rewound.
    File(File),
}

impl CachedSource {
    /// Returns `true` if the data is served from memory.
    pub fn is_cached(&self) -> bool {
        matches!(self, CachedSource::Cached(_))
    }
}

impl Read for CachedSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            CachedSource::Cached(cursor) => cursor.read(buf),
            CachedSource::File(file) => file.read(buf),
        }
    }
}

impl Seek for CachedSource {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            CachedSource::Cached(cursor) => cursor.seek(pos),
            CachedSource::File(file) => file.seek(pos),
        }
    }
}

impl ReadReset for CachedSource {
    fn reset(&mut self) -> io::Result<()> {
        self.rewind()
    }
}
