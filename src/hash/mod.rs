//! Digest algorithms for stream identity.
//!
//! - [`DigestAlgorithm`] - The algorithms an [`Identifier`](crate::Identifier) can run
//! - [`DigestHasher`] - A streaming hasher for one algorithm
//! - [`ContentHash`] - A finalized digest value
//!
//! MD5, SHA-1, SHA-256 and SHA-512 are always available. BLAKE3 requires the
//! `hash-blake3` feature.

mod algorithm;
#[cfg(feature = "hash-blake3")]
mod blake3;
mod digest;
mod hasher;

pub use algorithm::DigestAlgorithm;
#[cfg(feature = "hash-blake3")]
pub use blake3::Blake3Hasher;
pub use digest::ContentHash;
pub use hasher::DigestHasher;
