//! Structural Feature Extraction
//!
//! The numeric block of the feature matrix: amount, text lengths and
//! submission-time slots, in the order fixed by `layout.rs`.

use super::layout::STRUCTURAL_COUNT;
use crate::logic::record::BidRecord;

/// Structural block for a single bid.
///
/// Missing numeric fields contribute a neutral 0; a missing or unparseable
/// timestamp contributes the fixed hour/weekday fallback via `BidRecord`.
pub fn structural_features(record: &BidRecord) -> [f32; STRUCTURAL_COUNT] {
    [
        record.bid_amount as f32,
        record.proposal.chars().count() as f32,
        record.company_name.chars().count() as f32,
        record.submission_hour() as f32,
        record.submission_weekday() as f32,
    ]
}
