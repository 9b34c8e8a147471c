//! Scorer - inference against a fitted state
//!
//! Fails closed: an untrained state or empty input yields empty results,
//! which callers must treat as "no opinion", never as "all clean".

use serde::{Deserialize, Serialize};

use crate::logic::features::{extract, VocabularyMode};
use crate::logic::model::state::ModelState;
use crate::logic::record::BidRecord;

/// Outcome for a single scored bid.
///
/// Derived, not persisted here; writing it back onto the bid record is the
/// caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyResult {
    /// Decision value: more negative = more unusual. Only meaningful
    /// relative to the trained corpus, not as an absolute probability.
    pub score: f32,
    pub is_anomaly: bool,
}

/// Score an ordered batch of bids.
///
/// Returns parallel score and flag sequences in record order. A record is
/// flagged exactly when the forest's outlier predicate says so; there is no
/// separate caller-tunable threshold.
pub fn score(state: &ModelState, records: &[BidRecord]) -> (Vec<f32>, Vec<bool>) {
    let Some((scaler, vectorizer, forest)) = state.fitted() else {
        return (Vec::new(), Vec::new());
    };
    if records.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let features = extract(records, VocabularyMode::Reuse(vectorizer));
    let scaled = scaler.transform(&features);

    let scores = forest.decision_function(&scaled);
    let flags = scores.iter().map(|&s| s < 0.0).collect();
    (scores, flags)
}

/// Score a single bid; `None` when the model is not trained.
///
/// Defined as the batch case with one record, so the result is identical to
/// that record's slot in any larger batch.
pub fn score_one(state: &ModelState, record: &BidRecord) -> Option<AnomalyResult> {
    let (scores, flags) = score(state, std::slice::from_ref(record));
    match (scores.first(), flags.first()) {
        (Some(&score), Some(&is_anomaly)) => Some(AnomalyResult { score, is_anomaly }),
        _ => None,
    }
}
