//! Bid Record - Input unit of the detection pipeline
//!
//! Records are owned by the external bid store; the core only borrows them
//! for the duration of a training or scoring call.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::constants::{FALLBACK_SUBMISSION_HOUR, FALLBACK_SUBMISSION_WEEKDAY};

/// Accepted `submitted_at` formats, tried in order after RFC 3339.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A single bid as supplied by the bid store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidRecord {
    pub id: i64,
    pub tender_id: i64,
    pub company_name: String,
    pub contact_email: String,
    pub bid_amount: f64,
    pub proposal: String,
    /// Submission timestamp as stored. `None` or an unparseable value falls
    /// back to a fixed midday/mid-week slot instead of raising.
    pub submitted_at: Option<String>,
}

impl BidRecord {
    /// Parse the submission timestamp, if present and well formed.
    pub fn submission_time(&self) -> Option<NaiveDateTime> {
        let raw = self.submitted_at.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            // Keep the clock time as written, not shifted to UTC.
            return Some(dt.naive_local());
        }

        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(dt);
            }
        }

        // Date-only values resolve to midnight.
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    /// Submission hour of day (0-23), with the fixed fallback.
    pub fn submission_hour(&self) -> u32 {
        self.submission_time()
            .map(|t| t.hour())
            .unwrap_or(FALLBACK_SUBMISSION_HOUR)
    }

    /// Submission weekday (0 = Monday .. 6 = Sunday), with the fixed fallback.
    pub fn submission_weekday(&self) -> u32 {
        self.submission_time()
            .map(|t| t.weekday().num_days_from_monday())
            .unwrap_or(FALLBACK_SUBMISSION_WEEKDAY)
    }

    /// Text seen by the lexical feature block.
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.proposal, self.company_name)
    }
}
