//! Integration tests for webhook verification and event dispatch.
//!
//! Deliveries are built the way the API sends them: a serialized envelope
//! plus signed `x-timestamp`, `x-nonce`, `x-webhook-id` and `x-signature`
//! headers.

use chrono::{TimeZone, Utc};
use moov_api::webhooks::payloads::{AccountCreated, TransferParty, TransferUpdated};
use moov_api::webhooks::{
    compute_signature, verify_webhook, EventError, EventPayload, EventType, SignatureError,
    WebhookError, WebhookRequest, WebhookSecret, WebhookVerifier, HEADER_NONCE, HEADER_SIGNATURE,
    HEADER_TIMESTAMP, HEADER_WEBHOOK_ID,
};

const SECRET: &str = "whsec-integration";
const TIMESTAMP: &str = "2024-04-26T21:20:55Z";
const NONCE: &str = "nonce-9f2c";
const WEBHOOK_ID: &str = "d9f1c0a4-1b0e-4d55-9a57-6a2b8f0e2c11";

fn transfer_payload() -> TransferUpdated {
    TransferUpdated {
        account_id: "acc-platform".to_string(),
        transfer_id: "tr-42".to_string(),
        status: "completed".to_string(),
        foreign_id: Some("order-7".to_string()),
        source: TransferParty {
            account_id: "acc-payer".to_string(),
            payment_method_id: "pm-1".to_string(),
            payment_method_type: "ach-debit-fund".to_string(),
        },
        destination: TransferParty {
            account_id: "acc-payee".to_string(),
            payment_method_id: "pm-2".to_string(),
            payment_method_type: "moov-wallet".to_string(),
        },
    }
}

fn envelope(payload: &EventPayload) -> Vec<u8> {
    let created_on = Utc.with_ymd_and_hms(2024, 4, 26, 21, 20, 55).unwrap();
    moov_api::Event::from_payload("evt-1", created_on, payload)
        .unwrap()
        .to_json()
        .unwrap()
}

/// Builds a delivery with mixed-case header names, as a web framework might.
fn delivery(body: Vec<u8>, signature: &str) -> WebhookRequest {
    let headers = [
        ("X-Timestamp", TIMESTAMP),
        ("X-Nonce", NONCE),
        ("X-Webhook-ID", WEBHOOK_ID),
        ("X-Signature", signature),
        ("Content-Type", "application/json"),
    ];
    WebhookRequest::from_headers(headers, body)
}

fn verifier() -> WebhookVerifier {
    WebhookVerifier::new(WebhookSecret::new(SECRET).unwrap())
}

// ============================================================================
// End-to-end Delivery
// ============================================================================

#[test]
fn test_signed_delivery_dispatches_to_typed_payload() {
    let body = envelope(&EventPayload::TransferUpdated(transfer_payload()));
    let signature = compute_signature(TIMESTAMP, NONCE, WEBHOOK_ID, SECRET);

    let event = verifier()
        .verify_and_parse(delivery(body, &signature))
        .unwrap();

    assert_eq!(event.event_id(), "evt-1");
    assert_eq!(event.event_type(), EventType::TransferUpdated);
    assert_eq!(event.transfer_updated().unwrap(), transfer_payload());

    match event.payload().unwrap() {
        EventPayload::TransferUpdated(transfer) => assert_eq!(transfer.status, "completed"),
        other => panic!("unexpected payload {other:?}"),
    }
}

#[test]
fn test_wrong_accessor_reports_both_types() {
    let body = envelope(&EventPayload::AccountCreated(AccountCreated {
        account_id: "acc-new".to_string(),
    }));
    let signature = compute_signature(TIMESTAMP, NONCE, WEBHOOK_ID, SECRET);

    let event = verifier()
        .verify_and_parse(delivery(body, &signature))
        .unwrap();

    assert_eq!(event.account_created().unwrap().account_id, "acc-new");
    match event.transfer_updated() {
        Err(EventError::TypeMismatch { expected, actual }) => {
            assert_eq!(expected, EventType::TransferUpdated);
            assert_eq!(actual, EventType::AccountCreated);
        }
        other => panic!("expected type mismatch, got {other:?}"),
    }
}

#[test]
fn test_verified_webhook_exposes_headers() {
    let signature = compute_signature(TIMESTAMP, NONCE, WEBHOOK_ID, SECRET);
    let request = WebhookRequest::from_headers(
        [
            (HEADER_TIMESTAMP, TIMESTAMP),
            (HEADER_NONCE, NONCE),
            (HEADER_WEBHOOK_ID, WEBHOOK_ID),
            (HEADER_SIGNATURE, signature.as_str()),
        ],
        b"{}".to_vec(),
    );

    let verified = verify_webhook(SECRET, request).unwrap();
    assert_eq!(verified.timestamp(), TIMESTAMP);
    assert_eq!(verified.nonce(), NONCE);
    assert_eq!(verified.webhook_id(), WEBHOOK_ID);
    assert_eq!(verified.body(), b"{}");
}

// ============================================================================
// Rejections
// ============================================================================

#[test]
fn test_tampered_signature_is_rejected_before_parsing() {
    let body = envelope(&EventPayload::TransferUpdated(transfer_payload()));
    let signature = compute_signature(TIMESTAMP, NONCE, WEBHOOK_ID, "some-other-secret");

    let error = verifier()
        .verify_and_parse(delivery(body, &signature))
        .unwrap_err();

    assert!(matches!(
        error,
        WebhookError::Signature(SignatureError::Mismatch)
    ));
}

#[test]
fn test_missing_signature_header_is_rejected() {
    let request = WebhookRequest::from_headers(
        [
            (HEADER_TIMESTAMP, TIMESTAMP),
            (HEADER_NONCE, NONCE),
            (HEADER_WEBHOOK_ID, WEBHOOK_ID),
        ],
        b"{}".to_vec(),
    );

    let error = verifier().verify(request).unwrap_err();
    assert_eq!(
        error,
        SignatureError::MissingHeader {
            name: HEADER_SIGNATURE
        }
    );
}

#[test]
fn test_empty_secret_fails_closed() {
    let signature = compute_signature(TIMESTAMP, NONCE, WEBHOOK_ID, SECRET);
    let error = verify_webhook("", delivery(b"{}".to_vec(), &signature)).unwrap_err();
    assert_eq!(error, SignatureError::MissingSecret);
}

#[test]
fn test_unknown_event_type_is_reported_after_verification() {
    let body = serde_json::to_vec(&serde_json::json!({
        "eventID": "evt-2",
        "type": "brand.new.event",
        "data": {"anything": true},
        "createdOn": "2024-04-26T21:20:55Z"
    }))
    .unwrap();
    let signature = compute_signature(TIMESTAMP, NONCE, WEBHOOK_ID, SECRET);

    let error = verifier()
        .verify_and_parse(delivery(body, &signature))
        .unwrap_err();

    match error {
        WebhookError::Event(EventError::UnknownEventType { event_type }) => {
            assert_eq!(event_type, "brand.new.event");
        }
        other => panic!("expected unknown event type, got {other:?}"),
    }
}

#[test]
fn test_rotated_secret_still_verifies_old_deliveries() {
    let body = envelope(&EventPayload::TransferUpdated(transfer_payload()));
    let signature = compute_signature(TIMESTAMP, NONCE, WEBHOOK_ID, "old-secret");

    let verifier = WebhookVerifier::new(WebhookSecret::new("new-secret").unwrap())
        .with_previous_secret(WebhookSecret::new("old-secret").unwrap());

    let event = verifier
        .verify_and_parse(delivery(body, &signature))
        .unwrap();
    assert_eq!(event.transfer_updated().unwrap().transfer_id, "tr-42");
}
