//! Integration tests for wire types
//!
//! Decodes payloads shaped like the refund-status server's responses and
//! checks the request bodies the client produces.

use chrono::{TimeZone, Utc};
use refundline_domain::{
    AssistantActionType, AssistantChatResponse, Config, Identity, LoginRequest, RefundStatus,
    RefundStatusResponse, RefundStatusUpdate,
};

#[test]
fn test_refund_status_with_estimate() {
    let json = r#"{
        "taxYear": 2025,
        "status": "AVAILABLE",
        "lastUpdatedAt": "2026-04-02T09:15:00Z",
        "expectedAmount": 1834.27,
        "trackingId": "IRS-2025-000123",
        "availableAtEstimated": "2026-04-05T00:00:00Z",
        "aiExplanation": "Your refund has been deposited."
    }"#;

    let status: RefundStatusResponse = serde_json::from_str(json).unwrap();

    assert_eq!(status.status, RefundStatus::Available);
    assert_eq!(status.last_updated_at, Utc.with_ymd_and_hms(2026, 4, 2, 9, 15, 0).unwrap());
    assert_eq!(
        status.available_at_estimated,
        Some(Utc.with_ymd_and_hms(2026, 4, 5, 0, 0, 0).unwrap())
    );
    assert_eq!(status.tracking_id.as_deref(), Some("IRS-2025-000123"));
}

#[test]
fn test_refund_status_not_found_minimal() {
    let json = r#"{ "taxYear": 2025, "status": "NOT_FOUND", "lastUpdatedAt": "2026-01-01T00:00:00Z" }"#;

    let status: RefundStatusResponse = serde_json::from_str(json).unwrap();
    assert_eq!(status.status, RefundStatus::NotFound);
    assert!(status.expected_amount.is_none());
}

#[test]
fn test_unknown_refund_status_is_rejected() {
    let json = r#"{ "taxYear": 2025, "status": "LOST", "lastUpdatedAt": "2026-01-01T00:00:00Z" }"#;
    assert!(serde_json::from_str::<RefundStatusResponse>(json).is_err());
}

#[test]
fn test_simulate_body_uses_server_field_names() {
    let update = RefundStatusUpdate {
        tax_year: 2024,
        status: RefundStatus::Rejected,
        expected_amount: 0.0,
        tracking_id: "TRK-9".into(),
    };

    let json = serde_json::to_value(&update).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "taxYear": 2024,
            "status": "REJECTED",
            "expectedAmount": 0.0,
            "trackingId": "TRK-9"
        })
    );
}

#[test]
fn test_login_body() {
    let request = LoginRequest { email: "ana@example.com".into(), password: "pw".into() };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json, serde_json::json!({ "email": "ana@example.com", "password": "pw" }));
}

#[test]
fn test_identity() {
    let identity: Identity =
        serde_json::from_str(r#"{ "userId": 42, "email": "ana@example.com", "role": "ADMIN" }"#)
            .unwrap();
    assert_eq!(identity.user_id, 42);
    assert_eq!(identity.role, "ADMIN");
}

#[test]
fn test_assistant_answer_without_optional_lists() {
    let answer: AssistantChatResponse = serde_json::from_str(
        r#"{
            "answerMarkdown": "Contact support.",
            "actions": [{ "type": "CONTACT_SUPPORT", "label": "Get help" }],
            "confidence": "LOW"
        }"#,
    )
    .unwrap();

    assert!(answer.citations.is_empty());
    assert_eq!(answer.actions[0].action_type, AssistantActionType::ContactSupport);
}

#[test]
fn test_default_config_points_at_local_server() {
    let config = Config::default();
    assert_eq!(config.api.base_url, "http://localhost:8080");
    assert_eq!(config.logging.level, "info");
}
