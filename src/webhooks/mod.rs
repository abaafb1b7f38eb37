//! Webhook verification and typed event dispatch.
//!
//! Inbound deliveries go through two steps, always in this order:
//!
//! 1. **Verify**: [`WebhookVerifier::verify`] checks the HMAC-SHA512
//!    signature over the `x-timestamp`, `x-nonce` and `x-webhook-id` headers
//!    and yields a [`VerifiedWebhook`]
//! 2. **Parse**: [`VerifiedWebhook::parse_event`] decodes the envelope into an
//!    [`Event`], whose typed accessors decode the payload for exactly one
//!    [`EventType`]
//!
//! Both steps are stateless and can run concurrently for any number of
//! deliveries.
//!
//! # Overview
//!
//! - [`WebhookVerifier`], [`WebhookSecret`], [`WebhookRequest`]: Verification
//! - [`Event`], [`EventType`], [`EventPayload`]: Envelope and dispatch
//! - [`payloads`]: One struct per event type
//! - [`SignatureError`], [`EventError`], [`WebhookError`]: Error types
//!
//! # Example
//!
//! ```rust,ignore
//! use moov_api::webhooks::{EventPayload, WebhookRequest, WebhookSecret, WebhookVerifier};
//!
//! let verifier = WebhookVerifier::new(WebhookSecret::new(signing_secret)?);
//!
//! let request = WebhookRequest::from_headers(
//!     headers.iter().map(|(k, v)| (k.as_str(), v.to_str().unwrap_or_default())),
//!     body.to_vec(),
//! );
//!
//! let event = verifier.verify_and_parse(request)?;
//! match event.payload()? {
//!     EventPayload::TransferUpdated(transfer) => {
//!         println!("transfer {} is now {}", transfer.transfer_id, transfer.status);
//!     }
//!     EventPayload::DisputeCreated(dispute) => open_case(dispute),
//!     _ => {}
//! }
//! ```
//!
//! # Error Handling
//!
//! ```rust
//! use moov_api::webhooks::{EventError, SignatureError, WebhookError};
//!
//! fn status_for(error: &WebhookError) -> u16 {
//!     match error {
//!         // Reject unauthenticated deliveries
//!         WebhookError::Signature(_) => 401,
//!         // A new event type the SDK does not know yet
//!         WebhookError::Event(EventError::UnknownEventType { .. }) => 422,
//!         WebhookError::Event(_) => 400,
//!     }
//! }
//!
//! assert_eq!(status_for(&SignatureError::Mismatch.into()), 401);
//! ```

mod errors;
mod event;
pub mod payloads;
mod verification;

pub use errors::{EventError, SignatureError, WebhookError};
pub use event::{Event, EventPayload, EventType};
pub use verification::{
    compute_signature, verify_signature, verify_webhook, VerifiedWebhook, WebhookRequest,
    WebhookSecret, WebhookVerifier, HEADER_NONCE, HEADER_SIGNATURE, HEADER_TIMESTAMP,
    HEADER_WEBHOOK_ID,
};
