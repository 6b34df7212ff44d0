//! Gzip re-encoding of the identified stream.

use std::io::{self, Write};

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::cache::BoundedCache;

/// A gzip encoder writing into its own [`BoundedCache`].
///
/// The encoder buffers internally; [`GzipDerivative::finish`] must run before
/// the cache size means anything. Once finished, writes fail until
/// [`GzipDerivative::reset`].
#[derive(Debug)]
pub(crate) struct GzipDerivative {
    encoder: GzEncoder<BoundedCache>,
    capacity: u64,
    finished: bool,
}

impl GzipDerivative {
    pub(crate) fn new(capacity: u64) -> Self {
        Self {
            encoder: GzEncoder::new(BoundedCache::new(capacity), Compression::default()),
            capacity,
            finished: false,
        }
    }

    /// Flushes the remaining compressed data and the gzip trailer.
    pub(crate) fn finish(&mut self) -> io::Result<()> {
        self.encoder.try_finish()?;
        self.finished = true;
        Ok(())
    }

    pub(crate) fn cache(&self) -> &BoundedCache {
        self.encoder.get_ref()
    }

    /// Starts a fresh gzip member, reusing the cache allocation.
    pub(crate) fn reset(&mut self) {
        let fresh = GzEncoder::new(BoundedCache::new(self.capacity), Compression::default());
        let previous = std::mem::replace(&mut self.encoder, fresh);
        // fresh encoder has not emitted its header yet, so swapping the sink is safe
        if let Ok(mut cache) = previous.finish() {
            cache.reset();
            *self.encoder.get_mut() = cache;
        }
        self.finished = false;
    }
}

impl Write for GzipDerivative {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.finished {
            return Err(io::Error::other("gzip derivative already finished"));
        }
        self.encoder.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.encoder.flush()
    }
}
