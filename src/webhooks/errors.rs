//! Webhook-specific error types for the Moov API SDK.
//!
//! # Error Handling
//!
//! - [`SignatureError`]: The delivery could not be authenticated. Always
//!   fail closed on this error and never look at the body.
//! - [`EventError`]: The verified body is not a usable event, or a typed
//!   accessor was called for the wrong event type.
//! - [`WebhookError`]: Unified error type for verify-then-parse flows.
//!
//! # Example
//!
//! ```rust
//! use moov_api::webhooks::{EventError, EventType, WebhookError, SignatureError};
//!
//! let error = WebhookError::from(EventError::TypeMismatch {
//!     expected: EventType::TransferCreated,
//!     actual: EventType::DisputeUpdated,
//! });
//! assert!(error.to_string().contains("transfer.created"));
//!
//! let error = WebhookError::from(SignatureError::Mismatch);
//! assert_eq!(error.to_string(), "Webhook signature verification failed");
//! ```

use thiserror::Error;

use crate::webhooks::event::EventType;

/// Error returned when a webhook delivery fails authentication.
///
/// Messages are intentionally generic and never include header values or
/// secret material.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// No signing secret was configured.
    #[error("No webhook signing secret is configured")]
    MissingSecret,

    /// A required signature header is absent or empty.
    #[error("Webhook request is missing the '{name}' header")]
    MissingHeader {
        /// The missing header name.
        name: &'static str,
    },

    /// The delivered signature does not match the computed one.
    #[error("Webhook signature verification failed")]
    Mismatch,
}

/// Error returned when a verified body cannot be used as an event.
#[derive(Debug, Error)]
pub enum EventError {
    /// The envelope's type tag is not a recognized event type.
    #[error("Unknown webhook event type '{event_type}'")]
    UnknownEventType {
        /// The unrecognized tag.
        event_type: String,
    },

    /// A typed accessor was called for a different event type.
    #[error("Expected a '{expected}' event but received '{actual}'")]
    TypeMismatch {
        /// The event type the accessor decodes.
        expected: EventType,
        /// The envelope's actual event type.
        actual: EventType,
    },

    /// The envelope or its payload is not valid JSON of the expected shape.
    #[error("Invalid webhook event body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Unified error type for webhook handling.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Signature verification failed.
    #[error(transparent)]
    Signature(#[from] SignatureError),

    /// Event parsing or dispatch failed.
    #[error(transparent)]
    Event(#[from] EventError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_errors_do_not_leak_details() {
        for error in [
            SignatureError::MissingSecret,
            SignatureError::MissingHeader { name: "x-signature" },
            SignatureError::Mismatch,
        ] {
            let message = error.to_string();
            assert!(!message.contains("secret-value"));
            assert!(!message.to_lowercase().contains("expected"));
        }
    }

    #[test]
    fn test_missing_header_names_the_header() {
        let error = SignatureError::MissingHeader { name: "x-nonce" };
        assert_eq!(
            error.to_string(),
            "Webhook request is missing the 'x-nonce' header"
        );
    }

    #[test]
    fn test_type_mismatch_names_both_tags() {
        let error = EventError::TypeMismatch {
            expected: EventType::AccountCreated,
            actual: EventType::TransferUpdated,
        };
        assert_eq!(
            error.to_string(),
            "Expected a 'account.created' event but received 'transfer.updated'"
        );
    }

    #[test]
    fn test_unknown_event_type_message() {
        let error = EventError::UnknownEventType {
            event_type: "widget.exploded".to_string(),
        };
        assert!(error.to_string().contains("widget.exploded"));
    }

    #[test]
    fn test_webhook_error_is_transparent() {
        let error: WebhookError = SignatureError::Mismatch.into();
        assert!(matches!(error, WebhookError::Signature(SignatureError::Mismatch)));

        let error: WebhookError = EventError::UnknownEventType {
            event_type: "x".to_string(),
        }
        .into();
        assert!(error.to_string().contains("'x'"));
    }

    #[test]
    fn test_all_error_types_implement_std_error() {
        let _: &dyn std::error::Error = &SignatureError::Mismatch;
        let _: &dyn std::error::Error = &WebhookError::Signature(SignatureError::MissingSecret);
    }
}
