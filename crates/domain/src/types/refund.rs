//! Refund status types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a filed return's refund
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefundStatus {
    NotFound,
    Received,
    Processing,
    Approved,
    Sent,
    Available,
    Rejected,
}

/// Body of `GET /api/refund/latest`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundStatusResponse {
    pub tax_year: i32,
    pub status: RefundStatus,
    pub last_updated_at: DateTime<Utc>,
    #[serde(default)]
    pub expected_amount: Option<f64>,
    #[serde(default)]
    pub tracking_id: Option<String>,
    #[serde(default)]
    pub available_at_estimated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ai_explanation: Option<String>,
}

/// Body of `POST /api/refund/simulate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundStatusUpdate {
    pub tax_year: i32,
    pub status: RefundStatus,
    pub expected_amount: f64,
    pub tracking_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_server_payload_with_nulls() {
        let json = r#"{
            "taxYear": 2025,
            "status": "PROCESSING",
            "lastUpdatedAt": "2026-03-01T12:00:00Z",
            "expectedAmount": null,
            "trackingId": null,
            "availableAtEstimated": null,
            "aiExplanation": null
        }"#;

        let refund: RefundStatusResponse = serde_json::from_str(json).unwrap();
        assert_eq!(refund.tax_year, 2025);
        assert_eq!(refund.status, RefundStatus::Processing);
        assert!(refund.expected_amount.is_none());
    }

    #[test]
    fn status_uses_screaming_case() {
        let json = serde_json::to_string(&RefundStatus::NotFound).unwrap();
        assert_eq!(json, "\"NOT_FOUND\"");
    }
}
