//! Bid Anomaly Detection Core
//!
//! Converts heterogeneous bid records into numeric feature vectors, fits an
//! unsupervised isolation forest over a bid corpus, scores bids for
//! suspiciousness and produces rule-based explanations for flagged bids.
//!
//! ## Architecture
//! - `logic/features/` - Feature extraction (structural block + TF-IDF text block)
//! - `logic/model/` - Scaler, isolation forest, trainer, scorer
//! - `logic/explain/` - Heuristic explanation engine
//! - `logic/storage/` - Persisted model artifacts (scaler, vectorizer, forest)
//!
//! The model is an explicit owned [`ModelState`] value. Callers pass it into
//! training and scoring calls and are responsible for serializing concurrent
//! training against the same state; the core performs no locking of its own.

pub mod constants;
pub mod logic;

pub use logic::alert::{suspicious_bid_alert, AlertNotification, Severity};
pub use logic::explain::explain;
pub use logic::features::{extract, VocabularyMode};
pub use logic::model::{
    score, score_one, train, AnomalyResult, ModelConfig, ModelState, ModelStatus,
};
pub use logic::record::BidRecord;
pub use logic::storage::{ModelStore, StoreError};
