//! Shannon entropy over a byte stream.
//!
//! - [`EntropyCounter`] - Byte histogram with on-demand entropy

use std::io;

/// Accumulates a byte-value histogram and reports Shannon entropy in bits
/// per byte.
///
/// The histogram is updated on every write; the entropy itself is recomputed
/// from the histogram on each call to [`EntropyCounter::entropy`].
///
/// # Example
///
/// ```
/// use identrs::EntropyCounter;
///
/// let mut counter = EntropyCounter::new();
/// counter.update(&(0..=255u8).collect::<Vec<_>>());
/// assert!((counter.entropy() - 8.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct EntropyCounter {
    histogram: [u64; 256],
    total: u64,
}

impl EntropyCounter {
    /// Creates an empty counter.
    pub fn new() -> Self {
        Self {
            histogram: [0; 256],
            total: 0,
        }
    }

    /// Counts every byte of `data`.
    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.histogram[byte as usize] += 1;
        }
        self.total += data.len() as u64;
    }

    /// Returns the number of bytes counted.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns the Shannon entropy in bits per byte, in `0.0..=8.0`.
    ///
    /// An empty counter has entropy 0.
    pub fn entropy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let total = self.total as f64;
        self.histogram
            .iter()
            .filter(|&&count| count > 0)
            .map(|&count| {
                let p = count as f64 / total;
                -p * p.log2()
            })
            .sum()
    }

    /// Clears the histogram.
    pub fn reset(&mut self) {
        self.histogram = [0; 256];
        self.total = 0;
    }
}

impl Default for EntropyCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl io::Write for EntropyCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entropy_of(data: &[u8]) -> f64 {
        let mut counter = EntropyCounter::new();
        counter.update(data);
        counter.entropy()
    }

    fn assert_close(expected: f64, actual: f64) {
        assert!(
            (expected - actual).abs() < 0.01,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(entropy_of(b""), 0.0);
    }

    #[test]
    fn test_single_value() {
        assert_eq!(entropy_of(b"a"), 0.0);
        assert_eq!(entropy_of(&[0x42; 4096]), 0.0);
    }

    #[test]
    fn test_text() {
        assert_close(3.76, entropy_of(b"coolo beans this is awesome... really awesome"));
        assert_close(3.25, entropy_of(b"foo who boo this is nice"));
        assert_close(3.46, entropy_of(b"Something cool"));
    }

    #[test]
    fn test_every_byte_once() {
        let data: Vec<u8> = (0..=255u8).collect();
        assert_close(8.0, entropy_of(&data));
    }

    #[test]
    fn test_chunking_does_not_matter() {
        let mut counter = EntropyCounter::new();
        counter.update(b"foo who boo ");
        counter.update(b"this is nice");
        assert_eq!(counter.entropy(), entropy_of(b"foo who boo this is nice"));
        assert_eq!(counter.total(), 24);
    }

    #[test]
    fn test_reset() {
        let mut counter = EntropyCounter::new();
        counter.update(&(0..=255u8).collect::<Vec<_>>());
        counter.reset();
        assert_eq!(counter.total(), 0);
        assert_eq!(counter.entropy(), 0.0);
    }
}
