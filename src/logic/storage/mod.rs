//! Storage Module - persisted model state
//!
//! Three independently-named artifacts under a fixed directory: the scaler,
//! the vectorizer and the forest. The snapshot is trusted only when all
//! three are present and deserialize cleanly; anything less loads as
//! untrained. There is no partial-trust state.

pub mod artifact;

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::constants::APP_NAME;
use crate::logic::features::layout::LayoutMismatchError;
use crate::logic::features::TfidfVectorizer;
use crate::logic::model::{IsolationForest, ModelConfig, ModelState, StandardScaler};
use self::artifact::SealedArtifact;

const SCALER_FILE: &str = "scaler.json";
const VECTORIZER_FILE: &str = "vectorizer.json";
const FOREST_FILE: &str = "forest.json";

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
    ChecksumMismatch { artifact: String },
    LayoutMismatch(LayoutMismatchError),
    NotTrained,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {}", e),
            StoreError::Serialization(e) => write!(f, "serialization error: {}", e),
            StoreError::ChecksumMismatch { artifact } => {
                write!(f, "checksum mismatch in artifact '{}'", artifact)
            }
            StoreError::LayoutMismatch(e) => write!(f, "{}", e),
            StoreError::NotTrained => write!(f, "model state is not trained"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err)
    }
}

impl From<LayoutMismatchError> for StoreError {
    fn from(err: LayoutMismatchError) -> Self {
        StoreError::LayoutMismatch(err)
    }
}

/// Default model directory, overridable via `BID_ANOMALY_MODEL_DIR`.
pub fn default_model_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BID_ANOMALY_MODEL_DIR") {
        return PathBuf::from(dir);
    }
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join("models")
}

/// Persistence adapter over a fixed artifact directory.
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn at_default_location() -> Self {
        Self::new(default_model_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist a trained state as three sealed artifacts.
    pub fn save(&self, state: &ModelState) -> Result<(), StoreError> {
        let (scaler, vectorizer, forest) = state.fitted().ok_or(StoreError::NotTrained)?;

        fs::create_dir_all(&self.dir)?;
        self.write_artifact(SCALER_FILE, scaler)?;
        self.write_artifact(VECTORIZER_FILE, vectorizer)?;
        self.write_artifact(FOREST_FILE, forest)?;

        log::info!("model state saved to {}", self.dir.display());
        Ok(())
    }

    /// Restore the persisted state, if a complete valid snapshot exists.
    ///
    /// A missing, partial or corrupt snapshot yields `None`; the caller
    /// starts untrained. Rejections are logged, absence is not an error.
    pub fn load(&self) -> Option<ModelState> {
        let complete = [SCALER_FILE, VECTORIZER_FILE, FOREST_FILE]
            .iter()
            .all(|file| self.dir.join(file).exists());
        if !complete {
            log::info!("no persisted model state at {}", self.dir.display());
            return None;
        }

        match self.try_load() {
            Ok(state) => {
                log::info!(
                    "loaded trained model state from {} ({} trees)",
                    self.dir.display(),
                    state.config.ensemble_size
                );
                Some(state)
            }
            Err(e) => {
                log::warn!("persisted model state rejected: {}; starting untrained", e);
                None
            }
        }
    }

    /// Process-start convenience: restored state or a fresh untrained one.
    pub fn load_or_untrained(&self) -> ModelState {
        self.load().unwrap_or_default()
    }

    fn write_artifact<T: Serialize>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        let sealed = SealedArtifact::seal(value)?;
        let json = serde_json::to_vec_pretty(&sealed)?;
        fs::write(self.dir.join(file), json)?;
        Ok(())
    }

    fn read_artifact<T: DeserializeOwned>(&self, file: &str) -> Result<T, StoreError> {
        let data = fs::read(self.dir.join(file))?;
        let sealed: SealedArtifact = serde_json::from_slice(&data)?;
        sealed.open(file)
    }

    fn try_load(&self) -> Result<ModelState, StoreError> {
        let scaler: StandardScaler = self.read_artifact(SCALER_FILE)?;
        let vectorizer: TfidfVectorizer = self.read_artifact(VECTORIZER_FILE)?;
        let forest: IsolationForest = self.read_artifact(FOREST_FILE)?;

        // The artifacts carry the configuration they were fit with.
        let config = ModelConfig {
            contamination: forest.contamination(),
            ensemble_size: forest.n_estimators(),
            max_text_features: vectorizer.max_features(),
            seed: forest.seed(),
        };

        let mut state = ModelState::new(config);
        state.scaler = Some(scaler);
        state.vectorizer = Some(vectorizer);
        state.forest = Some(forest);
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn trained_state() -> ModelState {
        let features = array![
            [1.0f32, 10.0],
            [2.0, 20.0],
            [3.0, 30.0],
            [4.0, 40.0],
            [5.0, 50.0],
        ];
        let scaler = StandardScaler::fit(&features);
        let scaled = scaler.transform(&features);

        let mut vectorizer = TfidfVectorizer::new(100);
        vectorizer.fit(&[
            "concrete and steel supply".to_string(),
            "steel delivery".to_string(),
        ]);

        let mut state = ModelState::default();
        state.scaler = Some(scaler);
        state.vectorizer = Some(vectorizer);
        state.forest = Some(IsolationForest::fit(&scaled, 10, 0.1, 42));
        state
    }

    #[test]
    fn test_save_untrained_state_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path());

        let result = store.save(&ModelState::default());
        assert!(matches!(result, Err(StoreError::NotTrained)));
    }

    #[test]
    fn test_save_load_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path());

        store.save(&trained_state()).unwrap();

        let loaded = store.load().expect("complete snapshot must load");
        assert!(loaded.is_trained());
        assert_eq!(loaded.config.ensemble_size, 10);
        assert_eq!(loaded.config.seed, 42);
    }

    #[test]
    fn test_missing_directory_loads_untrained() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("never-created"));

        assert!(store.load().is_none());
        assert!(!store.load_or_untrained().is_trained());
    }

    #[test]
    fn test_partial_snapshot_loads_untrained() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path());

        store.save(&trained_state()).unwrap();
        fs::remove_file(dir.path().join(VECTORIZER_FILE)).unwrap();

        assert!(store.load().is_none());
    }

    #[test]
    fn test_corrupt_artifact_loads_untrained() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path());

        store.save(&trained_state()).unwrap();
        fs::write(dir.path().join(FOREST_FILE), b"{ not json").unwrap();

        assert!(store.load().is_none());
    }

    #[test]
    fn test_tampered_artifact_loads_untrained() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path());

        store.save(&trained_state()).unwrap();

        let path = dir.path().join(SCALER_FILE);
        let mut sealed: SealedArtifact =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        sealed.body = serde_json::json!({"mean": [0.0, 0.0], "scale": [1.0, 1.0]});
        fs::write(&path, serde_json::to_vec_pretty(&sealed).unwrap()).unwrap();

        assert!(store.load().is_none());
    }
}
