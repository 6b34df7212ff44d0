//! The identification pipeline.
//!
//! - [`Identifier`] - Single-pass fan-out writer with open/closed/reset lifecycle
//! - [`Identification`] - Snapshot of what the identifier computed

mod derivative;
mod engine;
mod identification;

pub use engine::Identifier;
pub use identification::Identification;
