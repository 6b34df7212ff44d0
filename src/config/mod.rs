//! Configuration for stream identification.
//!
//! [`IdentifyConfig`] selects which consumers an [`Identifier`] runs and how
//! large its caches are.
//!
//! # Example
//!
//! ```
//! use identrs::IdentifyConfig;
//!
//! // Everything on
//! let config = IdentifyConfig::default();
//!
//! // Digests only, plus a gzip derivative
//! let config = IdentifyConfig::checksum_only().with_gzip_cache_size(1 << 20);
//! assert!(!config.filetype());
//! ```

use std::io::Write;

use crate::error::{IdentifyError, Result};
use crate::filetype;
use crate::hash::DigestAlgorithm;
use crate::identifier::Identifier;

/// Configuration for an [`Identifier`].
///
/// A plain `Copy` value: every `with_*` method returns an updated copy and
/// leaves the original untouched.
///
/// When file type detection is on, the primary cache is sized to at least
/// the sniff limit so the classifier always sees its full window; see
/// [`IdentifyConfig::effective_cache_size`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentifyConfig {
    md5: bool,
    sha1: bool,
    sha256: bool,
    sha512: bool,
    #[cfg(feature = "hash-blake3")]
    blake3: bool,
    entropy: bool,
    filetype: bool,
    cache_size: u64,
    gzip_cache_size: u64,
    sniff_limit: usize,
}

impl IdentifyConfig {
    /// Creates a configuration from explicit toggles.
    ///
    /// BLAKE3 starts disabled; enable it with [`IdentifyConfig::with_blake3`].
    /// A `gzip_cache_size` of 0 disables the gzip derivative.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        md5: bool,
        sha1: bool,
        sha256: bool,
        sha512: bool,
        entropy: bool,
        filetype: bool,
        cache_size: u64,
        gzip_cache_size: u64,
    ) -> Self {
        Self {
            md5,
            sha1,
            sha256,
            sha512,
            #[cfg(feature = "hash-blake3")]
            blake3: false,
            entropy,
            filetype,
            cache_size,
            gzip_cache_size,
            sniff_limit: filetype::default_sniff_limit(),
        }
    }

    /// MD5, SHA-1, SHA-256 and SHA-512 only. No entropy, no file type.
    pub fn checksum_only() -> Self {
        Self::new(true, true, true, true, false, false, 0, 0)
    }

    /// Enables or disables MD5.
    pub fn with_md5(mut self, on: bool) -> Self {
        self.md5 = on;
        self
    }

    /// Enables or disables SHA-1.
    pub fn with_sha1(mut self, on: bool) -> Self {
        self.sha1 = on;
        self
    }

    /// Enables or disables SHA-256.
    pub fn with_sha256(mut self, on: bool) -> Self {
        self.sha256 = on;
        self
    }

    /// Enables or disables SHA-512.
    pub fn with_sha512(mut self, on: bool) -> Self {
        self.sha512 = on;
        self
    }

    /// Enables or disables BLAKE3 (requires `hash-blake3` feature).
    #[cfg(feature = "hash-blake3")]
    pub fn with_blake3(mut self, on: bool) -> Self {
        self.blake3 = on;
        self
    }

    /// Enables or disables one algorithm.
    pub fn with_algorithm(self, algorithm: DigestAlgorithm, on: bool) -> Self {
        match algorithm {
            DigestAlgorithm::Md5 => self.with_md5(on),
            DigestAlgorithm::Sha1 => self.with_sha1(on),
            DigestAlgorithm::Sha256 => self.with_sha256(on),
            DigestAlgorithm::Sha512 => self.with_sha512(on),
            #[cfg(feature = "hash-blake3")]
            DigestAlgorithm::Blake3 => self.with_blake3(on),
        }
    }

    /// Enables or disables entropy.
    pub fn with_entropy(mut self, on: bool) -> Self {
        self.entropy = on;
        self
    }

    /// Enables or disables file type detection.
    pub fn with_filetype(mut self, on: bool) -> Self {
        self.filetype = on;
        self
    }

    /// Sets the requested primary cache size.
    pub fn with_cache_size(mut self, size: u64) -> Self {
        self.cache_size = size;
        self
    }

    /// Sets the gzip derivative cache size. 0 disables the derivative.
    pub fn with_gzip_cache_size(mut self, size: u64) -> Self {
        self.gzip_cache_size = size;
        self
    }

    /// Sets the number of leading bytes the file type classifier looks at.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`IdentifyConfig::validate`] to reject a zero limit.
    pub fn with_sniff_limit(mut self, limit: usize) -> Self {
        self.sniff_limit = limit;
        self
    }

    /// Returns whether `algorithm` is enabled.
    pub fn algorithm(&self, algorithm: DigestAlgorithm) -> bool {
        match algorithm {
            DigestAlgorithm::Md5 => self.md5,
            DigestAlgorithm::Sha1 => self.sha1,
            DigestAlgorithm::Sha256 => self.sha256,
            DigestAlgorithm::Sha512 => self.sha512,
            #[cfg(feature = "hash-blake3")]
            DigestAlgorithm::Blake3 => self.blake3,
        }
    }

    /// Returns the enabled algorithms in fan-out order.
    pub fn algorithms(&self) -> impl Iterator<Item = DigestAlgorithm> + '_ {
        DigestAlgorithm::ALL
            .iter()
            .copied()
            .filter(|&algorithm| self.algorithm(algorithm))
    }

    /// Returns whether entropy is computed.
    pub fn entropy(&self) -> bool {
        self.entropy
    }

    /// Returns whether file type detection runs.
    pub fn filetype(&self) -> bool {
        self.filetype
    }

    /// Returns the requested primary cache size.
    pub fn cache_size(&self) -> u64 {
        self.cache_size
    }

    /// Returns the gzip derivative cache size.
    pub fn gzip_cache_size(&self) -> u64 {
        self.gzip_cache_size
    }

    /// Returns the sniff limit.
    pub fn sniff_limit(&self) -> usize {
        self.sniff_limit
    }

    /// Returns the capacity the primary cache is built with.
    ///
    /// `max(cache_size, sniff_limit)` with file type detection on,
    /// `cache_size` otherwise.
    pub fn effective_cache_size(&self) -> u64 {
        if !self.filetype {
            return self.cache_size;
        }
        self.cache_size.max(self.sniff_limit as u64)
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<()> {
        if self.sniff_limit == 0 {
            return Err(IdentifyError::InvalidConfig {
                message: "sniff limit must be non-zero",
            });
        }
        Ok(())
    }

    /// Builds an [`Identifier`] from this configuration.
    pub fn identifier<'a>(&self) -> Identifier<'a> {
        Identifier::new(*self)
    }

    /// Builds an [`Identifier`] that also forwards every byte to `sinks`.
    pub fn identifier_with_sinks<'a, I>(&self, sinks: I) -> Identifier<'a>
    where
        I: IntoIterator<Item = Box<dyn Write + Send + 'a>>,
    {
        Identifier::with_sinks(*self, sinks)
    }
}

impl Default for IdentifyConfig {
    /// Every digest except BLAKE3, entropy and file type; no cache override,
    /// no gzip derivative.
    fn default() -> Self {
        Self::new(true, true, true, true, true, true, 0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IdentifyConfig::default();
        assert!(config.algorithm(DigestAlgorithm::Md5));
        assert!(config.algorithm(DigestAlgorithm::Sha512));
        assert!(config.entropy());
        assert!(config.filetype());
        assert_eq!(config.cache_size(), 0);
        assert_eq!(config.gzip_cache_size(), 0);
        assert_eq!(config.sniff_limit(), filetype::default_sniff_limit());
    }

    #[test]
    fn test_checksum_only() {
        let config = IdentifyConfig::checksum_only();
        assert_eq!(config.algorithms().count(), 4);
        assert!(!config.entropy());
        assert!(!config.filetype());
    }

    #[test]
    fn test_builder_leaves_original() {
        let base = IdentifyConfig::default();
        let changed = base.with_md5(false).with_entropy(false);

        assert!(base.algorithm(DigestAlgorithm::Md5));
        assert!(base.entropy());
        assert!(!changed.algorithm(DigestAlgorithm::Md5));
        assert!(!changed.entropy());
    }

    #[test]
    fn test_with_algorithm() {
        let config = IdentifyConfig::checksum_only()
            .with_algorithm(DigestAlgorithm::Sha1, false)
            .with_algorithm(DigestAlgorithm::Md5, false);
        let enabled: Vec<_> = config.algorithms().collect();
        assert_eq!(enabled, [DigestAlgorithm::Sha256, DigestAlgorithm::Sha512]);
    }

    #[cfg(feature = "hash-blake3")]
    #[test]
    fn test_blake3_is_opt_in() {
        assert!(!IdentifyConfig::default().algorithm(DigestAlgorithm::Blake3));
        let config = IdentifyConfig::default().with_blake3(true);
        assert_eq!(config.algorithms().last(), Some(DigestAlgorithm::Blake3));
    }

    #[test]
    fn test_effective_cache_size() {
        let config = IdentifyConfig::default().with_sniff_limit(3072);
        assert_eq!(config.effective_cache_size(), 3072);
        assert_eq!(config.with_cache_size(10_000).effective_cache_size(), 10_000);
        assert_eq!(config.with_cache_size(100).effective_cache_size(), 3072);

        let no_filetype = config.with_filetype(false).with_cache_size(100);
        assert_eq!(no_filetype.effective_cache_size(), 100);
    }

    #[test]
    fn test_validate() {
        assert!(IdentifyConfig::default().validate().is_ok());
        assert!(IdentifyConfig::default().with_sniff_limit(0).validate().is_err());
    }
}
