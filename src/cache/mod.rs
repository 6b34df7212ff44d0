//! Capped content caches.
//!
//! - [`BoundedCache`] - Fixed-capacity sink that keeps counting past capacity
//! - [`CachedFile`] - File reader that tees what it reads into a cache
//! - [`CachedSource`] - Re-readable source handed back by a [`CachedFile`]

mod bounded;
mod file;

pub use bounded::BoundedCache;
pub use file::{CachedFile, CachedSource};
