//! Model Module - Outlier Detection Pipeline
//!
//! Scaler + isolation forest over the extracted features, with an owned
//! state value and explicit train/score entry points.

pub mod forest;
pub mod scaler;
pub mod scorer;
pub mod state;
pub mod trainer;


// Re-export common types
pub use forest::IsolationForest;
pub use scaler::StandardScaler;
pub use scorer::{score, score_one, AnomalyResult};
pub use state::{ModelConfig, ModelState, ModelStatus};
pub use trainer::train;
