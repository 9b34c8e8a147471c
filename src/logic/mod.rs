//! Logic Module - Detection Engines
//!
//! Contains the anomaly-detection pipeline: record model, feature
//! extraction, outlier model, explanation engine and persisted state.

pub mod alert;
pub mod record;

pub mod explain;
pub mod features;
pub mod model;
pub mod storage;
