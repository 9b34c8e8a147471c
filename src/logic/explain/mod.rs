//! Explain Module - human-readable rationale for flagged bids

pub mod engine;

pub use engine::explain;
