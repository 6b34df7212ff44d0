//! Streaming hasher dispatch over the supported algorithms.

use std::io;

use sha2::Digest as _;

#[cfg(feature = "hash-blake3")]
use super::Blake3Hasher;
use super::{ContentHash, DigestAlgorithm};

/// A streaming hasher for one [`DigestAlgorithm`].
///
/// Implements [`io::Write`] so it can sit in the identifier's fan-out next to
/// the other consumers. Writes never fail.
#[derive(Debug, Clone)]
pub enum DigestHasher {
    /// MD5 state.
    Md5(md5::Md5),
    /// SHA-1 state.
    Sha1(sha1::Sha1),
    /// SHA-256 state.
    Sha256(sha2::Sha256),
    /// SHA-512 state.
    Sha512(sha2::Sha512),
    /// BLAKE3 state.
    #[cfg(feature = "hash-blake3")]
    Blake3(Blake3Hasher),
}

impl DigestHasher {
    /// Creates an empty hasher for `algorithm`.
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        match algorithm {
            DigestAlgorithm::Md5 => DigestHasher::Md5(md5::Md5::new()),
            DigestAlgorithm::Sha1 => DigestHasher::Sha1(sha1::Sha1::new()),
            DigestAlgorithm::Sha256 => DigestHasher::Sha256(sha2::Sha256::new()),
            DigestAlgorithm::Sha512 => DigestHasher::Sha512(sha2::Sha512::new()),
            #[cfg(feature = "hash-blake3")]
            DigestAlgorithm::Blake3 => DigestHasher::Blake3(Blake3Hasher::new()),
        }
    }

    /// Returns the algorithm this hasher computes.
    pub fn algorithm(&self) -> DigestAlgorithm {
        match self {
            DigestHasher::Md5(_) => DigestAlgorithm::Md5,
            DigestHasher::Sha1(_) => DigestAlgorithm::Sha1,
            DigestHasher::Sha256(_) => DigestAlgorithm::Sha256,
            DigestHasher::Sha512(_) => DigestAlgorithm::Sha512,
            #[cfg(feature = "hash-blake3")]
            DigestHasher::Blake3(_) => DigestAlgorithm::Blake3,
        }
    }

    /// Updates the hasher with more data.
    pub fn update(&mut self, data: &[u8]) {
        match self {
            DigestHasher::Md5(h) => h.update(data),
            DigestHasher::Sha1(h) => h.update(data),
            DigestHasher::Sha256(h) => h.update(data),
            DigestHasher::Sha512(h) => h.update(data),
            #[cfg(feature = "hash-blake3")]
            DigestHasher::Blake3(h) => h.update(data),
        }
    }

    /// Returns the digest of everything written since creation or the last
    /// reset. The running state is not consumed.
    pub fn finalize(&self) -> ContentHash {
        let algorithm = self.algorithm();
        let bytes = match self {
            DigestHasher::Md5(h) => h.clone().finalize().to_vec(),
            DigestHasher::Sha1(h) => h.clone().finalize().to_vec(),
            DigestHasher::Sha256(h) => h.clone().finalize().to_vec(),
            DigestHasher::Sha512(h) => h.clone().finalize().to_vec(),
            #[cfg(feature = "hash-blake3")]
            DigestHasher::Blake3(h) => return h.finalize(),
        };
        ContentHash::new(algorithm, bytes)
            .unwrap_or_else(|| unreachable!("{algorithm} produced a digest of the wrong length"))
    }

    /// Resets the hasher to its initial state.
    pub fn reset(&mut self) {
        match self {
            DigestHasher::Md5(h) => h.reset(),
            DigestHasher::Sha1(h) => h.reset(),
            DigestHasher::Sha256(h) => h.reset(),
            DigestHasher::Sha512(h) => h.reset(),
            #[cfg(feature = "hash-blake3")]
            DigestHasher::Blake3(h) => h.reset(),
        }
    }
}

impl io::Write for DigestHasher {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
