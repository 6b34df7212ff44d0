//! identrs
//!
//! Single-pass streaming identification of byte streams.
//!
//! `identrs` pushes a byte stream once through a set of consumers and reports
//! what they found:
//!
//! - MD5, SHA-1, SHA-256, SHA-512 and (optionally) BLAKE3 digests
//! - Shannon entropy
//! - content type, sniffed from a bounded head of the stream
//! - the size of a gzip-compressed derivative
//!
//! It is built for forensic and storage pipelines where each byte should be
//! read from disk exactly once.
//!
//! The crate intentionally:
//! - does NOT walk directories or recurse into archives
//! - does NOT synchronize an [`Identifier`] internally
//! - does NOT persist results
//!
//! It only does one thing: **Bytes in → identification out**
//!
//! # Sync
//!
//! ```no_run
//! use std::fs::File;
//! use std::io;
//! use identrs::{IdentifyConfig, IdentifyError};
//!
//! fn main() -> Result<(), IdentifyError> {
//!     let mut file = File::open("evidence.bin")?;
//!     let mut identifier = IdentifyConfig::default().identifier();
//!
//!     io::copy(&mut file, &mut identifier)?;
//!     identifier.close()?;
//!
//!     let id = identifier.identification()?;
//!     println!("{} {:?}", id.size, id.sha256);
//!     Ok(())
//! }
//! ```
//!
//! # Pooling
//!
//! An [`Identifier`] is reusable: [`Identifier::reset`] returns it to a fresh
//! open state without reallocating its caches.
//!
//! ```
//! use identrs::IdentifyConfig;
//!
//! let mut identifier = IdentifyConfig::checksum_only().identifier();
//! for input in [&b"first"[..], &b"second"[..]] {
//!     identifier.reset();
//!     identifier.write(input)?;
//!     identifier.close()?;
//!     assert_eq!(identifier.identification()?.size, input.len() as u64);
//! }
//! # Ok::<(), identrs::IdentifyError>(())
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::AsyncWriteExt;
//! use identrs::IdentifyConfig;
//!
//! async fn demo(data: &[u8]) -> std::io::Result<()> {
//!     let mut identifier = IdentifyConfig::default().identifier();
//!     identifier.write_all(data).await?;
//!     AsyncWriteExt::close(&mut identifier).await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bounded;
mod buffer;
mod cache;
mod config;
mod entropy;
mod error;
pub mod filetype;
mod gzip;
mod hash;
mod identifier;

#[cfg(feature = "async-io")]
mod async_io;

pub use bounded::{BoundedFile, BoundedFilePool, MAX_POOL_SIZE};
pub use buffer::ThresholdWriter;
pub use cache::{BoundedCache, CachedFile, CachedSource};
pub use config::IdentifyConfig;
pub use entropy::EntropyCounter;
pub use error::{IdentifyError, Result};
pub use filetype::Filetype;
pub use gzip::{GzipReader, ReadReset};
#[cfg(feature = "hash-blake3")]
pub use hash::Blake3Hasher;
pub use hash::{ContentHash, DigestAlgorithm, DigestHasher};
pub use identifier::{Identification, Identifier};
