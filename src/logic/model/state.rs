//! Model State - owned lifecycle of the fitted pipeline
//!
//! One logical model instance per process, held as an explicit owned value
//! rather than a process-global. The persistence adapter is the only
//! authority for cross-restart continuity.

use serde::{Deserialize, Serialize};

use super::forest::IsolationForest;
use super::scaler::StandardScaler;
use crate::constants::{
    DEFAULT_CONTAMINATION, DEFAULT_ENSEMBLE_SIZE, DEFAULT_MAX_TEXT_FEATURES, DEFAULT_RANDOM_SEED,
};
use crate::logic::features::layout::display_feature_names;
use crate::logic::features::TfidfVectorizer;

/// Training configuration, fixed per state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Expected outlier fraction of the training corpus
    pub contamination: f32,
    /// Number of isolation trees
    pub ensemble_size: usize,
    /// Vocabulary bound of the lexical block
    pub max_text_features: usize,
    /// Seed for reproducible forest construction
    pub seed: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            contamination: DEFAULT_CONTAMINATION,
            ensemble_size: DEFAULT_ENSEMBLE_SIZE,
            max_text_features: DEFAULT_MAX_TEXT_FEATURES,
            seed: DEFAULT_RANDOM_SEED,
        }
    }
}

/// The fitted pipeline: scaler, vectorizer and forest, or nothing.
///
/// All three artifacts are replaced together by a successful training run
/// and restored together by the store; there is no partial-trust state.
#[derive(Debug, Clone, Default)]
pub struct ModelState {
    pub config: ModelConfig,
    pub(crate) scaler: Option<StandardScaler>,
    pub(crate) vectorizer: Option<TfidfVectorizer>,
    pub(crate) forest: Option<IsolationForest>,
}

impl ModelState {
    /// Fresh untrained state with the given configuration.
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            scaler: None,
            vectorizer: None,
            forest: None,
        }
    }

    pub fn is_trained(&self) -> bool {
        self.scaler.is_some() && self.vectorizer.is_some() && self.forest.is_some()
    }

    /// All three fitted artifacts, if trained.
    pub(crate) fn fitted(
        &self,
    ) -> Option<(&StandardScaler, &TfidfVectorizer, &IsolationForest)> {
        match (&self.scaler, &self.vectorizer, &self.forest) {
            (Some(scaler), Some(vectorizer), Some(forest)) => Some((scaler, vectorizer, forest)),
            _ => None,
        }
    }

    /// Read-only snapshot for display and monitoring.
    pub fn status(&self) -> ModelStatus {
        ModelStatus {
            trained: self.is_trained(),
            model_type: "Isolation Forest".to_string(),
            contamination_rate: self.config.contamination,
            ensemble_size: self.config.ensemble_size,
            feature_names: display_feature_names(),
        }
    }
}

/// Status snapshot for external tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStatus {
    pub trained: bool,
    pub model_type: String,
    pub contamination_rate: f32,
    pub ensemble_size: usize,
    pub feature_names: Vec<String>,
}
