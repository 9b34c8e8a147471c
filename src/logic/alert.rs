//! Alerting Boundary - payload the caller sends when a bid is flagged
//!
//! The core never raises alerts itself; it only supplies `is_anomaly`.
//! When the caller observes a flagged bid it builds this notification and
//! hands it to its alert store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertNotification {
    pub alert_type: String,
    pub severity: Severity,
    pub message: String,
    pub related_entity_type: String,
    pub related_entity_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Notification for a bid the scorer flagged as anomalous.
pub fn suspicious_bid_alert(record: &crate::logic::record::BidRecord) -> AlertNotification {
    AlertNotification {
        alert_type: "Suspicious Bid".to_string(),
        severity: Severity::Medium,
        message: format!(
            "Suspicious bid detected for tender {} by {}",
            record.tender_id, record.company_name
        ),
        related_entity_type: "bid".to_string(),
        related_entity_id: record.id,
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::record::BidRecord;

    #[test]
    fn test_suspicious_bid_alert_payload() {
        let record = BidRecord {
            id: 42,
            tender_id: 7,
            company_name: "Vertex Holdings".to_string(),
            contact_email: "v@vertex.example".to_string(),
            bid_amount: 30_000.0,
            proposal: "Short".to_string(),
            submitted_at: None,
        };

        let alert = suspicious_bid_alert(&record);
        assert_eq!(alert.alert_type, "Suspicious Bid");
        assert_eq!(alert.severity, Severity::Medium);
        assert_eq!(alert.related_entity_type, "bid");
        assert_eq!(alert.related_entity_id, 42);
        assert_eq!(
            alert.message,
            "Suspicious bid detected for tender 7 by Vertex Holdings"
        );
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }
}
