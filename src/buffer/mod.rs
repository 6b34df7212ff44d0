//! Buffered output.
//!
//! - [`ThresholdWriter`] - Writer that only creates its file past a size threshold

mod file_writer;

pub use file_writer::ThresholdWriter;
