//! Trainer - fits the full pipeline from a bid corpus
//!
//! Training is destructive: every successful run replaces the fitted
//! scaler, vocabulary and forest wholesale. There is no incremental update.

use crate::constants::MIN_TRAINING_SAMPLES;
use crate::logic::features::{extract, TfidfVectorizer, VocabularyMode};
use crate::logic::model::forest::IsolationForest;
use crate::logic::model::scaler::StandardScaler;
use crate::logic::model::state::ModelState;
use crate::logic::record::BidRecord;
use crate::logic::storage::ModelStore;

/// Fit the model over a bid corpus and persist the result.
///
/// Returns `false` without touching the state when the corpus is below the
/// training floor. On success the new state is written to the store; a save
/// failure is logged but the in-memory trained state stands, so the next
/// restart may load a stale or absent snapshot.
pub fn train(state: &mut ModelState, corpus: &[BidRecord], store: &ModelStore) -> bool {
    if corpus.len() < MIN_TRAINING_SAMPLES {
        log::warn!(
            "training rejected: {} bids, need at least {}",
            corpus.len(),
            MIN_TRAINING_SAMPLES
        );
        return false;
    }

    let mut vectorizer = TfidfVectorizer::new(state.config.max_text_features);
    let features = extract(corpus, VocabularyMode::Fit(&mut vectorizer));

    let scaler = StandardScaler::fit(&features);
    let scaled = scaler.transform(&features);

    let forest = IsolationForest::fit(
        &scaled,
        state.config.ensemble_size,
        state.config.contamination,
        state.config.seed,
    );

    state.scaler = Some(scaler);
    state.vectorizer = Some(vectorizer);
    state.forest = Some(forest);

    log::info!(
        "model trained on {} bids ({} feature dimensions)",
        corpus.len(),
        features.ncols()
    );

    if let Err(e) = store.save(state) {
        log::error!("failed to persist model state: {}", e);
    }

    true
}
