//! Feature Layout - Structural Block Definition
//!
//! The structural block ordering is frozen: the scaler and the forest are
//! both fit against this order, so reordering silently corrupts them.
//!
//! ## Rules:
//! 1. Add a slot -> increment FEATURE_VERSION
//! 2. Change order -> increment FEATURE_VERSION
//! 3. Remove a slot -> increment FEATURE_VERSION
//!
//! Persisted artifacts embed the version and hash; loads reject mismatches
//! instead of scoring against a stale schema.

use crc32fast::Hasher;

/// Current structural layout version
pub const FEATURE_VERSION: u8 = 1;

/// Structural slot names in the exact order they appear in the matrix
pub const STRUCTURAL_LAYOUT: &[&str] = &[
    "bid_amount",          // 0: bid amount as submitted
    "proposal_length",     // 1: proposal length in characters
    "company_name_length", // 2: company name length in characters
    "submission_hour",     // 3: hour of day (0-23)
    "submission_weekday",  // 4: weekday (0 = Monday)
];

/// Width of the structural block
///
/// Must match STRUCTURAL_LAYOUT.len().
pub const STRUCTURAL_COUNT: usize = 5;

/// CRC32 hash of the structural layout, for mismatch detection at load time
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);
    for name in STRUCTURAL_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }
    hasher.finalize()
}

/// Feature names for status display: the structural slots plus the lexical
/// block summarized as a single entry.
pub fn display_feature_names() -> Vec<String> {
    let mut names: Vec<String> = STRUCTURAL_LAYOUT.iter().map(|s| s.to_string()).collect();
    names.push("text_features".to_string());
    names
}

/// Error when persisted state doesn't match the compiled layout
#[derive(Debug, Clone)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "feature layout mismatch: expected v{} (hash: {:08x}), got v{} (hash: {:08x})",
            self.expected_version, self.expected_hash, self.actual_version, self.actual_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

/// Validate that persisted data matches the compiled layout
pub fn validate_layout(version: u8, hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();
    if version != FEATURE_VERSION || hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: version,
            actual_hash: hash,
        });
    }
    Ok(())
}
