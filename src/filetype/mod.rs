//! Content-type sniffing.
//!
//! - [`Filetype`] - An (extension, media type) pair
//! - [`detect`] - Classify a byte prefix
//! - [`detect_reader`] - Classify the head of a reader
//!
//! The classifier looks at no more than a sniff limit of leading bytes. The
//! limit is passed explicitly; [`default_sniff_limit`] supplies the value used
//! by [`IdentifyConfig::default`](crate::IdentifyConfig), which can be changed
//! once per process with [`set_default_sniff_limit`].

mod magic;

use std::io::{self, Read};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{IdentifyError, Result};

/// Default number of leading bytes looked at when sniffing (3 KiB).
pub const DEFAULT_SNIFF_LIMIT: usize = 3072;

const OCTET_STREAM: &str = "application/octet-stream";
const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

static SNIFF_LIMIT: OnceLock<usize> = OnceLock::new();

/// Sets the process-wide default sniff limit.
///
/// May be called once, before or after the default has been read; the first
/// successful call wins. Fails if `limit` is zero or the default was already
/// set.
pub fn set_default_sniff_limit(limit: usize) -> Result<()> {
    if limit == 0 {
        return Err(IdentifyError::InvalidConfig {
            message: "sniff limit must be non-zero",
        });
    }
    SNIFF_LIMIT.set(limit).map_err(|_| IdentifyError::InvalidConfig {
        message: "default sniff limit already set",
    })
}

/// Returns the process-wide default sniff limit.
pub fn default_sniff_limit() -> usize {
    SNIFF_LIMIT.get().copied().unwrap_or(DEFAULT_SNIFF_LIMIT)
}

/// A detected file type.
///
/// `extension` carries a leading dot (`".gz"`) or is empty when no extension
/// is associated with the type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filetype {
    /// File extension, including the leading dot.
    pub extension: String,
    /// Canonical media type.
    pub mimetype: String,
}

impl Filetype {
    /// Creates a file type.
    pub fn new(extension: impl Into<String>, mimetype: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            mimetype: mimetype.into(),
        }
    }

    /// The type reported for directories.
    pub fn dir() -> Self {
        Self::new("dir", "directory/directory")
    }

    /// The type reported for symbolic links.
    pub fn symlink() -> Self {
        Self::new("symlink", "symlink/symlink")
    }

    /// The generic type reported when nothing matched.
    pub fn unknown() -> Self {
        Self::new("", OCTET_STREAM)
    }

    /// Returns `true` for the generic type.
    pub fn is_unknown(&self) -> bool {
        self.mimetype == OCTET_STREAM
    }
}

/// Classifies the first `limit` bytes of `data`.
///
/// Never fails; empty or unrecognized input yields [`Filetype::unknown`].
///
/// # Example
///
/// ```
/// use identrs::filetype::{detect, DEFAULT_SNIFF_LIMIT};
///
/// let ft = detect(&[0x1f, 0x8b, 0x08, 0x00], DEFAULT_SNIFF_LIMIT);
/// assert_eq!(ft.mimetype, "application/gzip");
/// assert_eq!(ft.extension, ".gz");
/// ```
pub fn detect(data: &[u8], limit: usize) -> Filetype {
    let head = &data[..data.len().min(limit)];
    if head.is_empty() {
        return Filetype::unknown();
    }
    if let Some(signature) = magic::lookup(head) {
        return Filetype::new(signature.extension, signature.mimetype);
    }
    if is_text(head, head.len() == limit) {
        return Filetype::new(".txt", TEXT_PLAIN);
    }
    Filetype::unknown()
}

/// Reads up to `limit` bytes from `reader` and classifies them.
pub fn detect_reader<R: Read>(reader: R, limit: usize) -> io::Result<Filetype> {
    let mut head = Vec::with_capacity(limit.min(DEFAULT_SNIFF_LIMIT));
    reader.take(limit as u64).read_to_end(&mut head)?;
    Ok(detect(&head, limit))
}

/// UTF-8 without NULs. A code point cut off by the sniff window still counts.
fn is_text(head: &[u8], truncated: bool) -> bool {
    if head.contains(&0) {
        return false;
    }
    match std::str::from_utf8(head) {
        Ok(_) => true,
        Err(e) => truncated && e.error_len().is_none() && e.valid_up_to() > 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn zlib(data: &[u8]) -> Vec<u8> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_gzip() {
        let ft = detect(&gzip(b"Something cool"), DEFAULT_SNIFF_LIMIT);
        assert_eq!(ft, Filetype::new(".gz", "application/gzip"));
    }

    #[test]
    fn test_zlib_is_unknown() {
        let ft = detect(&zlib(b"Something cool"), DEFAULT_SNIFF_LIMIT);
        assert!(ft.is_unknown());
        assert_eq!(ft.extension, "");
    }

    #[test]
    fn test_text() {
        let ft = detect(b"Something cool", DEFAULT_SNIFF_LIMIT);
        assert_eq!(ft.mimetype, "text/plain; charset=utf-8");
        assert_eq!(ft.extension, ".txt");
    }

    #[test]
    fn test_text_cut_mid_code_point() {
        // "é" is two bytes; the window ends between them
        let data = "aé".as_bytes();
        assert_eq!(detect(data, 2).extension, ".txt");
        // the stream itself ends mid code point
        assert!(detect(&data[..2], 3).is_unknown());
    }

    #[test]
    fn test_empty_is_unknown() {
        assert_eq!(detect(b"", DEFAULT_SNIFF_LIMIT), Filetype::unknown());
    }

    #[test]
    fn test_limit_hides_signature() {
        let mut tar = vec![0u8; 512];
        tar[257..263].copy_from_slice(b"ustar\0");
        assert_eq!(detect(&tar, 512).extension, ".tar");
        assert!(detect(&tar, 256).is_unknown());
    }

    #[test]
    fn test_signature_must_lead() {
        let mut data = b"1234567890".to_vec();
        data.extend_from_slice(&[0x1f, 0x8b, 0x08]);
        assert_eq!(detect(&data, DEFAULT_SNIFF_LIMIT).extension, "");
    }

    #[test]
    fn test_detect_reader() {
        let data = gzip(b"Something cool");
        let ft = detect_reader(&data[..], DEFAULT_SNIFF_LIMIT).unwrap();
        assert_eq!(ft.mimetype, "application/gzip");

        let ft = detect_reader(&b""[..], DEFAULT_SNIFF_LIMIT).unwrap();
        assert!(ft.is_unknown());
    }

    #[test]
    fn test_set_default_rejects_zero() {
        assert!(set_default_sniff_limit(0).is_err());
        assert!(default_sniff_limit() > 0);
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&Filetype::dir()).unwrap();
        assert_eq!(json, r#"{"extension":"dir","mimetype":"directory/directory"}"#);
    }
}
