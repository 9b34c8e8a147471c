//! Sealed Artifact - versioned, checksummed persistence envelope
//!
//! Every persisted artifact carries the feature layout version/hash it was
//! fit against and a SHA-256 digest of its body. A mismatch on either means
//! the artifact cannot be trusted and the whole snapshot is discarded.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::StoreError;
use crate::logic::features::layout::{layout_hash, validate_layout, FEATURE_VERSION};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealedArtifact {
    pub id: String,
    pub feature_version: u8,
    pub layout_hash: u32,
    pub saved_at: i64,
    /// SHA-256 hex digest of the canonical body serialization
    pub checksum: String,
    pub body: serde_json::Value,
}

impl SealedArtifact {
    /// Wrap a fitted artifact for storage.
    pub fn seal<T: Serialize>(value: &T) -> Result<Self, StoreError> {
        let body = serde_json::to_value(value)?;
        let checksum = digest(&serde_json::to_vec(&body)?);
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            feature_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            saved_at: Utc::now().timestamp(),
            checksum,
            body,
        })
    }

    /// Unwrap and validate a stored artifact.
    pub fn open<T: DeserializeOwned>(&self, name: &str) -> Result<T, StoreError> {
        validate_layout(self.feature_version, self.layout_hash)?;

        let bytes = serde_json::to_vec(&self.body)?;
        if digest(&bytes) != self.checksum {
            return Err(StoreError::ChecksumMismatch {
                artifact: name.to_string(),
            });
        }

        Ok(serde_json::from_value(self.body.clone())?)
    }
}

fn digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
