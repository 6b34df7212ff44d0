//! Fixed-capacity write sink.

use std::io;

use bytes::Bytes;

/// A write sink that retains at most `capacity` leading bytes while counting
/// every byte it sees.
///
/// Overflow is silent truncation, not an error: writes always report the full
/// chunk length. The retained prefix is what content-type sniffing reads, and
/// [`BoundedCache::size`] is what size accounting reads.
///
/// # Example
///
/// ```
/// use identrs::BoundedCache;
///
/// let mut cache = BoundedCache::new(4);
/// cache.write_bytes(b"hello");
/// assert_eq!(cache.bytes(), b"hell");
/// assert_eq!(cache.size(), 5);
/// assert!(!cache.is_cached());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BoundedCache {
    capacity: u64,
    size: u64,
    data: Vec<u8>,
}

impl BoundedCache {
    /// Creates an empty cache. No memory is reserved up front.
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            size: 0,
            data: Vec::new(),
        }
    }

    /// Accepts `chunk`, retaining only what fits under the capacity.
    ///
    /// Returns the full chunk length.
    pub fn write_bytes(&mut self, chunk: &[u8]) -> usize {
        let headroom = self.capacity.saturating_sub(self.size);
        if headroom > 0 {
            let keep = chunk.len().min(usize::try_from(headroom).unwrap_or(usize::MAX));
            self.data.extend_from_slice(&chunk[..keep]);
        }
        self.size += chunk.len() as u64;
        chunk.len()
    }

    /// Returns `true` if every byte seen is retained.
    pub fn is_cached(&self) -> bool {
        self.size <= self.capacity
    }

    /// Returns the total number of bytes seen, retained or not.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns the capacity.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Returns the retained prefix.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns an owned copy of the retained prefix.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.data)
    }

    /// Clears the cache. The allocation is kept for reuse.
    pub fn reset(&mut self) {
        self.data.clear();
        self.size = 0;
    }
}

impl io::Write for BoundedCache {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.write_bytes(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
