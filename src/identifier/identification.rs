//! Identification snapshot.

use serde::{Deserialize, Serialize};

use crate::filetype::Filetype;
use crate::hash::DigestAlgorithm;

/// What an [`Identifier`](crate::Identifier) learned about one stream.
///
/// Digests are lowercase hex and `None` when the algorithm was disabled.
/// `entropy` is 0 when entropy was disabled, `filetype` is `None` when file
/// type detection was disabled, and `gzip_size` is `None` without a gzip
/// derivative.
///
/// Serializes with disabled fields omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identification {
    /// MD5 digest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
    /// SHA-1 digest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,
    /// SHA-256 digest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    /// SHA-512 digest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha512: Option<String>,
    /// BLAKE3 digest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blake3: Option<String>,
    /// Shannon entropy in bits per byte.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub entropy: f64,
    /// Detected file type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filetype: Option<Filetype>,
    /// Total bytes written.
    pub size: u64,
    /// Size of the gzip re-encoding, trailer included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gzip_size: Option<u64>,
}

fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

impl Identification {
    /// Returns the hex digest for `algorithm`, if it was computed.
    pub fn digest(&self, algorithm: DigestAlgorithm) -> Option<&str> {
        let slot = match algorithm {
            DigestAlgorithm::Md5 => &self.md5,
            DigestAlgorithm::Sha1 => &self.sha1,
            DigestAlgorithm::Sha256 => &self.sha256,
            DigestAlgorithm::Sha512 => &self.sha512,
            #[cfg(feature = "hash-blake3")]
            DigestAlgorithm::Blake3 => &self.blake3,
        };
        slot.as_deref()
    }

    pub(crate) fn set_digest(&mut self, algorithm: DigestAlgorithm, hex: String) {
        let slot = match algorithm {
            DigestAlgorithm::Md5 => &mut self.md5,
            DigestAlgorithm::Sha1 => &mut self.sha1,
            DigestAlgorithm::Sha256 => &mut self.sha256,
            DigestAlgorithm::Sha512 => &mut self.sha512,
            #[cfg(feature = "hash-blake3")]
            DigestAlgorithm::Blake3 => &mut self.blake3,
        };
        *slot = Some(hex);
    }
}
