//! Explanation Engine - heuristic rationale for scored bids
//!
//! Rule-based and deliberately decoupled from the forest internals: the
//! rules read only the raw bid fields and the already-computed score, so an
//! explanation never depends on model introspection.

use crate::constants::{
    DEVIATION_THRESHOLD, EARLIEST_BUSINESS_HOUR, LATEST_BUSINESS_HOUR, LONG_PROPOSAL_CHARS,
    MIN_COMPANY_NAME_CHARS, SHORT_PROPOSAL_CHARS,
};
use crate::logic::record::BidRecord;

/// Ordered diagnostic strings for a scored bid.
///
/// Every applicable rule is appended; when none fires, a score-based
/// fallback guarantees the list is never empty.
pub fn explain(record: &BidRecord, score: f32) -> Vec<String> {
    let mut explanations = Vec::new();

    if record.bid_amount <= 0.0 {
        explanations.push("Invalid bid amount (zero or negative)".to_string());
    }

    let proposal_length = record.proposal.chars().count();
    if proposal_length < SHORT_PROPOSAL_CHARS {
        explanations.push(format!(
            "Very short proposal (less than {} characters)",
            SHORT_PROPOSAL_CHARS
        ));
    } else if proposal_length > LONG_PROPOSAL_CHARS {
        explanations.push(format!(
            "Unusually long proposal (over {} characters)",
            LONG_PROPOSAL_CHARS
        ));
    }

    if record.company_name.chars().count() < MIN_COMPANY_NAME_CHARS {
        explanations.push("Suspicious company name (too short)".to_string());
    }

    let hour = record.submission_hour();
    if hour < EARLIEST_BUSINESS_HOUR || hour > LATEST_BUSINESS_HOUR {
        explanations.push("Unusual submission time (outside business hours)".to_string());
    }

    if explanations.is_empty() {
        if score < DEVIATION_THRESHOLD {
            explanations
                .push("Pattern deviates significantly from normal bidding behavior".to_string());
        } else {
            explanations.push("Mild deviation from typical bid patterns".to_string());
        }
    }

    explanations
}
