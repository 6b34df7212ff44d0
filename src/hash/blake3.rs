//! BLAKE3 hashing backend.

use super::{ContentHash, DigestAlgorithm};

/// A hasher that computes BLAKE3 hashes.
#[derive(Debug, Clone)]
pub struct Blake3Hasher {
    state: blake3::Hasher,
}

impl Blake3Hasher {
    /// Creates a new hasher.
    pub fn new() -> Self {
        Self {
            state: blake3::Hasher::new(),
        }
    }

    /// Updates the hasher with more data.
    pub fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    /// Returns the hash of everything written so far.
    ///
    /// The state is left untouched, so more data may follow.
    pub fn finalize(&self) -> ContentHash {
        ContentHash::from_blake3(self.state.finalize())
    }

    /// Resets the hasher to its initial state.
    pub fn reset(&mut self) {
        self.state.reset();
    }
}

impl Default for Blake3Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentHash {
    fn from_blake3(hash: blake3::Hash) -> Self {
        // 32 bytes always matches the BLAKE3 output length
        Self::new(DigestAlgorithm::Blake3, hash.as_bytes().to_vec())
            .unwrap_or_else(|| unreachable!("blake3 output is 32 bytes"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_one_shot() {
        let mut hasher = Blake3Hasher::new();
        hasher.update(b"hello ");
        hasher.update(b"world");
        let hash = hasher.finalize();

        assert_eq!(hash.as_bytes(), blake3::hash(b"hello world").as_bytes());
    }

    #[test]
    fn test_finalize_does_not_consume() {
        let mut hasher = Blake3Hasher::new();
        hasher.update(b"hello");
        let first = hasher.finalize();
        assert_eq!(first, hasher.finalize());

        hasher.update(b" world");
        assert_ne!(first, hasher.finalize());
    }

    #[test]
    fn test_reset() {
        let mut hasher = Blake3Hasher::new();
        hasher.update(b"some data");

        hasher.reset();
        hasher.update(b"hello world");
        let hash = hasher.finalize();

        assert_eq!(hash.as_bytes(), blake3::hash(b"hello world").as_bytes());
    }
}
