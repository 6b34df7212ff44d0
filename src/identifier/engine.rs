//! Core identification engine - Identifier with a single-pass write API.
//!
//! Every chunk written is fanned out, in a fixed order, to:
//!
//! 1. one [`DigestHasher`] per enabled algorithm
//! 2. the [`EntropyCounter`], if enabled
//! 3. the primary [`BoundedCache`] (always present; it does size accounting)
//! 4. the gzip derivative, if enabled
//! 5. any attached sinks
//!
//! # Example
//!
//! ```
//! use identrs::{Identifier, IdentifyConfig};
//!
//! let mut identifier = Identifier::new(IdentifyConfig::default());
//! identifier.write(b"Something ")?;
//! identifier.write(b"cool")?;
//! identifier.close()?;
//!
//! let ident = identifier.identification()?;
//! assert_eq!(ident.size, 14);
//! assert_eq!(ident.md5.as_deref(), Some("db5ee56e2cab72f4e46bdd60965bef31"));
//! # Ok::<(), identrs::IdentifyError>(())
//! ```

use std::fmt;
use std::io::{self, Write};

use tracing::{debug, trace};

use super::derivative::GzipDerivative;
use super::identification::Identification;
use crate::cache::BoundedCache;
use crate::config::IdentifyConfig;
use crate::entropy::EntropyCounter;
use crate::error::{IdentifyError, Result};
use crate::filetype;
use crate::hash::{ContentHash, DigestAlgorithm, DigestHasher};

type Sink<'a> = Box<dyn Write + Send + 'a>;

/// A single-pass, multi-consumer identification writer.
///
/// `Identifier` consumes a byte stream exactly once and computes digests,
/// entropy, a capped content cache for file type sniffing and, optionally, the
/// size of a gzip re-encoding, all without buffering the whole stream.
///
/// # Lifecycle
///
/// - [`write`](Identifier::write) is allowed while open
/// - [`close`](Identifier::close) finalizes consumers and fails if already closed
/// - [`identification`](Identifier::identification) requires a closed identifier
/// - [`reset`](Identifier::reset) reopens for a new stream, keeping allocations
///
/// `reset` is also accepted on an open identifier; whatever was written so
/// far is discarded.
///
/// # Errors
///
/// The first failing consumer aborts the rest of a `write`. Consumers earlier
/// in the fan-out have already seen the chunk, so an identifier that returned
/// an I/O error should be reset or dropped.
///
/// # Concurrency
///
/// Not synchronized. Use one identifier per stream; pool them with `reset`.
pub struct Identifier<'a> {
    config: IdentifyConfig,
    hashers: Vec<DigestHasher>,
    entropy: Option<EntropyCounter>,
    cache: BoundedCache,
    gzip: Option<GzipDerivative>,
    sinks: Vec<Sink<'a>>,
    closed: bool,
    written: u64,
}

impl<'a> Identifier<'a> {
    /// Creates an identifier with the given configuration.
    pub fn new(config: IdentifyConfig) -> Self {
        Self::with_sinks(config, Vec::new())
    }

    /// Creates an identifier that also forwards every byte to `sinks`.
    ///
    /// Sinks run after the built-in consumers, in the order given.
    pub fn with_sinks<I>(config: IdentifyConfig, sinks: I) -> Self
    where
        I: IntoIterator<Item = Sink<'a>>,
    {
        let gzip = (config.gzip_cache_size() > 0)
            .then(|| GzipDerivative::new(config.gzip_cache_size()));
        Self {
            config,
            hashers: config.algorithms().map(DigestHasher::new).collect(),
            entropy: config.entropy().then(EntropyCounter::new),
            cache: BoundedCache::new(config.effective_cache_size()),
            gzip,
            sinks: sinks.into_iter().collect(),
            closed: false,
            written: 0,
        }
    }

    /// Consumers in fan-out order.
    fn route(&mut self) -> impl Iterator<Item = &mut dyn Write> {
        let hashers = self.hashers.iter_mut().map(as_sink);
        let entropy = self.entropy.iter_mut().map(as_sink);
        let cache = std::iter::once(as_sink(&mut self.cache));
        let gzip = self.gzip.iter_mut().map(as_sink);
        let sinks = self.sinks.iter_mut().map(as_sink);
        hashers.chain(entropy).chain(cache).chain(gzip).chain(sinks)
    }

    /// Writes `chunk` to every consumer.
    ///
    /// Returns the chunk length. An empty chunk returns 0 without touching
    /// any consumer.
    ///
    /// # Errors
    ///
    /// - [`IdentifyError::Closed`] if the identifier is closed
    /// - the first error returned by an attached sink
    pub fn write(&mut self, chunk: &[u8]) -> Result<usize> {
        if self.closed {
            return Err(IdentifyError::Closed { op: "write" });
        }
        if chunk.is_empty() {
            return Ok(0);
        }
        for consumer in self.route() {
            consumer.write_all(chunk)?;
        }
        self.written += chunk.len() as u64;
        Ok(chunk.len())
    }

    /// Adds a sink that receives every byte written from now on.
    ///
    /// Bytes already written are not replayed.
    pub fn attach_sink<W>(&mut self, sink: W)
    where
        W: Write + Send + 'a,
    {
        self.sinks.push(Box::new(sink));
    }

    /// Finalizes the consumers and closes the identifier.
    ///
    /// Flushes attached sinks, then emits the gzip trailer into the
    /// derivative cache. A failed sink flush leaves the identifier open and
    /// writable.
    ///
    /// # Errors
    ///
    /// [`IdentifyError::Closed`] if already closed; every call after the first
    /// successful one fails.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(IdentifyError::Closed { op: "close" });
        }
        for sink in &mut self.sinks {
            sink.flush()?;
        }
        if let Some(gzip) = self.gzip.as_mut() {
            gzip.finish()?;
        }
        self.closed = true;
        debug!(
            size = self.written,
            gzip_size = self.gzip.as_ref().map(|g| g.cache().size()),
            "identifier closed"
        );
        Ok(())
    }

    /// Reopens the identifier for a new stream and drops attached sinks.
    ///
    /// Hashers, entropy and caches are reset in place. Allowed whether or not
    /// the identifier was closed.
    pub fn reset(&mut self) {
        self.reset_with_sinks(Vec::new());
    }

    /// Reopens the identifier for a new stream with a new set of sinks.
    pub fn reset_with_sinks<I>(&mut self, sinks: I)
    where
        I: IntoIterator<Item = Sink<'a>>,
    {
        if !self.closed && self.written > 0 {
            trace!(discarded = self.written, "resetting open identifier");
        }
        for hasher in &mut self.hashers {
            hasher.reset();
        }
        if let Some(entropy) = self.entropy.as_mut() {
            entropy.reset();
        }
        self.cache.reset();
        if let Some(gzip) = self.gzip.as_mut() {
            gzip.reset();
        }
        self.sinks = sinks.into_iter().collect();
        self.closed = false;
        self.written = 0;
    }

    /// Returns a snapshot of what was computed.
    ///
    /// # Errors
    ///
    /// [`IdentifyError::NotClosed`] unless [`close`](Identifier::close) has
    /// succeeded since construction or the last reset.
    pub fn identification(&self) -> Result<Identification> {
        if !self.closed {
            return Err(IdentifyError::NotClosed);
        }

        let mut ident = Identification {
            size: self.written,
            ..Default::default()
        };
        for hasher in &self.hashers {
            ident.set_digest(hasher.algorithm(), hasher.finalize().to_hex());
        }
        if let Some(entropy) = &self.entropy {
            ident.entropy = entropy.entropy();
        }
        if self.config.filetype() {
            ident.filetype = Some(filetype::detect(
                self.cache.bytes(),
                self.config.sniff_limit(),
            ));
        }
        ident.gzip_size = self.gzip.as_ref().map(|g| g.cache().size());
        Ok(ident)
    }

    /// Returns the current digest for `algorithm`, if it is enabled.
    pub fn digest(&self, algorithm: DigestAlgorithm) -> Option<ContentHash> {
        self.hashers
            .iter()
            .find(|h| h.algorithm() == algorithm)
            .map(DigestHasher::finalize)
    }

    /// Returns the raw SHA-256 digest, if SHA-256 is enabled.
    pub fn sha256_bytes(&self) -> Option<Vec<u8>> {
        self.digest(DigestAlgorithm::Sha256)
            .map(ContentHash::into_bytes)
    }

    /// Returns the number of bytes written since construction or the last
    /// reset.
    pub fn size(&self) -> u64 {
        self.written
    }

    /// Returns `true` once [`close`](Identifier::close) has succeeded.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns the configuration.
    pub fn config(&self) -> &IdentifyConfig {
        &self.config
    }

    /// Returns the primary cache.
    pub fn cache(&self) -> &BoundedCache {
        &self.cache
    }

    /// Returns the gzip derivative cache, if enabled.
    pub fn gzip_cache(&self) -> Option<&BoundedCache> {
        self.gzip.as_ref().map(GzipDerivative::cache)
    }
}

fn as_sink<W: Write>(w: &mut W) -> &mut dyn Write {
    w
}

impl Default for Identifier<'_> {
    fn default() -> Self {
        Self::new(IdentifyConfig::default())
    }
}

impl fmt::Debug for Identifier<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identifier")
            .field("config", &self.config)
            .field("hashers", &self.hashers.len())
            .field("sinks", &self.sinks.len())
            .field("closed", &self.closed)
            .field("written", &self.written)
            .finish()
    }
}

impl Write for Identifier<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Identifier::write(self, buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        for sink in &mut self.sinks {
            sink.flush()?;
        }
        Ok(())
    }
}
