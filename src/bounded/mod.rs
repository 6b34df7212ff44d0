//! Windowed file readers.
//!
//! - [`BoundedFile`] - Read and seek within `[start, start + length)` of a file
//! - [`BoundedFilePool`] - Fixed set of reusable bounded handles over one file

mod file;
mod pool;

pub use file::BoundedFile;
pub use pool::{BoundedFilePool, MAX_POOL_SIZE};
