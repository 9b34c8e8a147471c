//! Central Configuration Constants
//!
//! Single source of truth for all detection defaults.
//! To change a threshold, only edit this file.

/// Minimum corpus size for training
///
/// Below this floor the scaler and forest are unreliable, so training
/// refuses to run and leaves any prior state untouched.
pub const MIN_TRAINING_SAMPLES: usize = 10;

/// Expected fraction of outliers in the training corpus
pub const DEFAULT_CONTAMINATION: f32 = 0.1;

/// Number of isolation trees in the ensemble
pub const DEFAULT_ENSEMBLE_SIZE: usize = 100;

/// Vocabulary bound for the lexical feature block
pub const DEFAULT_MAX_TEXT_FEATURES: usize = 100;

/// Fixed random seed for reproducible forest construction
pub const DEFAULT_RANDOM_SEED: u64 = 42;

/// Per-tree subsample cap
pub const MAX_TREE_SAMPLES: usize = 256;

/// Decision score below which a bid deviates "significantly"
pub const DEVIATION_THRESHOLD: f32 = -0.1;

/// Proposal shorter than this many characters is suspicious
pub const SHORT_PROPOSAL_CHARS: usize = 50;

/// Proposal longer than this many characters is suspicious
pub const LONG_PROPOSAL_CHARS: usize = 5000;

/// Company names shorter than this many characters are suspicious
pub const MIN_COMPANY_NAME_CHARS: usize = 3;

/// Business-hours window for the submission-time rule (inclusive)
pub const EARLIEST_BUSINESS_HOUR: u32 = 6;
pub const LATEST_BUSINESS_HOUR: u32 = 22;

/// Fallback hour when `submitted_at` is missing or unparseable
///
/// Load-bearing compatibility value. Changing it shifts the structural
/// feature slot of every malformed record.
pub const FALLBACK_SUBMISSION_HOUR: u32 = 12;

/// Fallback weekday (0 = Monday) when `submitted_at` is missing or unparseable
pub const FALLBACK_SUBMISSION_WEEKDAY: u32 = 2;

/// App name (used for the default model directory)
pub const APP_NAME: &str = "bid-anomaly";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
