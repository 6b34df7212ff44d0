//! Digest algorithm identifiers.

use std::fmt;

/// A digest algorithm supported by the identification pipeline.
///
/// The declaration order is the fan-out order used by
/// [`Identifier`](crate::Identifier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DigestAlgorithm {
    /// MD5 (128-bit).
    Md5,
    /// SHA-1 (160-bit).
    Sha1,
    /// SHA-256 (256-bit).
    Sha256,
    /// SHA-512 (512-bit).
    Sha512,
    /// BLAKE3 (256-bit).
    #[cfg(feature = "hash-blake3")]
    Blake3,
}

impl DigestAlgorithm {
    /// Every available algorithm, in fan-out order.
    pub const ALL: &'static [DigestAlgorithm] = &[
        DigestAlgorithm::Md5,
        DigestAlgorithm::Sha1,
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha512,
        #[cfg(feature = "hash-blake3")]
        DigestAlgorithm::Blake3,
    ];

    /// Returns the lowercase algorithm name, as used in serialized output.
    pub const fn name(self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "md5",
            DigestAlgorithm::Sha1 => "sha1",
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Sha512 => "sha512",
            #[cfg(feature = "hash-blake3")]
            DigestAlgorithm::Blake3 => "blake3",
        }
    }

    /// Returns the digest length in bytes.
    pub const fn output_len(self) -> usize {
        match self {
            DigestAlgorithm::Md5 => 16,
            DigestAlgorithm::Sha1 => 20,
            DigestAlgorithm::Sha256 => 32,
            DigestAlgorithm::Sha512 => 64,
            #[cfg(feature = "hash-blake3")]
            DigestAlgorithm::Blake3 => 32,
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
