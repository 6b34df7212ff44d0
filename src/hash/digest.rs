//! Finalized digest values.

use std::fmt;

use super::DigestAlgorithm;

/// A finalized digest together with the algorithm that produced it.
///
/// # Example
///
/// ```
/// use identrs::{ContentHash, DigestAlgorithm};
///
/// let hash = ContentHash::compute(DigestAlgorithm::Sha256, b"abc");
/// assert_eq!(
///     hash.to_hex(),
///     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash {
    algorithm: DigestAlgorithm,
    bytes: Vec<u8>,
}

impl ContentHash {
    /// Wraps raw digest output.
    ///
    /// Returns `None` if `bytes` does not have the algorithm's output length.
    pub fn new(algorithm: DigestAlgorithm, bytes: Vec<u8>) -> Option<Self> {
        if bytes.len() != algorithm.output_len() {
            return None;
        }
        Some(Self { algorithm, bytes })
    }

    /// Hashes `data` in one shot.
    pub fn compute(algorithm: DigestAlgorithm, data: &[u8]) -> Self {
        let mut hasher = super::DigestHasher::new(algorithm);
        hasher.update(data);
        hasher.finalize()
    }

    /// Parses a hex string produced by [`ContentHash::to_hex`].
    pub fn from_hex(algorithm: DigestAlgorithm, hex_str: &str) -> Option<Self> {
        let bytes = hex::decode(hex_str).ok()?;
        Self::new(algorithm, bytes)
    }

    /// Returns the algorithm.
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Returns the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the hash, returning the raw digest bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Returns the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl AsRef<[u8]> for ContentHash {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
