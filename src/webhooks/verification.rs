//! Webhook signature verification for the Moov API SDK.
//!
//! Every delivery carries four headers. The signature is the hex-encoded
//! HMAC-SHA512, keyed by the webhook signing secret, of
//!
//! ```text
//! x-timestamp + "|" + x-nonce + "|" + x-webhook-id
//! ```
//!
//! # Overview
//!
//! - [`WebhookVerifier`]: Verifies requests, with optional key rotation
//! - [`verify_webhook`]: One-shot verification with a single secret
//! - [`verify_signature`]: Low-level check for custom integrations
//! - [`compute_signature`]: Produces signatures, mainly for fixtures
//!
//! Only a [`VerifiedWebhook`] exposes the request body, so a delivery cannot
//! be parsed into an [`Event`] without passing verification first.
//!
//! # Example
//!
//! ```rust
//! use moov_api::webhooks::{compute_signature, WebhookRequest, WebhookSecret, WebhookVerifier};
//!
//! let secret = WebhookSecret::new("my-webhook-signing-secret").unwrap();
//! let signature = compute_signature("2024-04-26T21:20:55Z", "nonce-1", "hook-1", secret.as_ref());
//!
//! let request = WebhookRequest::from_headers(
//!     [
//!         ("X-Timestamp", "2024-04-26T21:20:55Z"),
//!         ("X-Nonce", "nonce-1"),
//!         ("X-Webhook-ID", "hook-1"),
//!         ("X-Signature", signature.as_str()),
//!     ],
//!     br#"{"eventID":"e"}"#.to_vec(),
//! );
//!
//! let verified = WebhookVerifier::new(secret).verify(request).unwrap();
//! assert_eq!(verified.webhook_id(), "hook-1");
//! ```
//!
//! # Security
//!
//! Verification fails closed: a missing secret, a missing header or a wrong
//! digest is always an error. Digests are compared in constant time.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha512;
use subtle::ConstantTimeEq;

use crate::error::ConfigError;
use crate::webhooks::errors::{SignatureError, WebhookError};
use crate::webhooks::event::Event;

type HmacSha512 = Hmac<Sha512>;

// ============================================================================
// Header Constants
// ============================================================================

/// HTTP header carrying the delivery timestamp.
pub const HEADER_TIMESTAMP: &str = "x-timestamp";

/// HTTP header carrying the per-delivery random nonce.
pub const HEADER_NONCE: &str = "x-nonce";

/// HTTP header carrying the webhook id.
pub const HEADER_WEBHOOK_ID: &str = "x-webhook-id";

/// HTTP header carrying the hex-encoded HMAC-SHA512 signature.
pub const HEADER_SIGNATURE: &str = "x-signature";

// ============================================================================
// WebhookSecret
// ============================================================================

/// A webhook signing secret.
///
/// The `Debug` output is masked.
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookSecret(String);

impl WebhookSecret {
    /// Creates a secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyWebhookSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptyWebhookSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for WebhookSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebhookSecret(*****)")
    }
}

// ============================================================================
// WebhookRequest
// ============================================================================

/// An incoming, not yet verified, webhook delivery.
///
/// The body is private; it becomes readable only through [`VerifiedWebhook`].
#[derive(Clone, Debug, Default)]
pub struct WebhookRequest {
    timestamp: Option<String>,
    nonce: Option<String>,
    webhook_id: Option<String>,
    signature: Option<String>,
    body: Vec<u8>,
}

impl WebhookRequest {
    /// Creates a request from individual header values.
    #[must_use]
    pub const fn new(
        timestamp: Option<String>,
        nonce: Option<String>,
        webhook_id: Option<String>,
        signature: Option<String>,
        body: Vec<u8>,
    ) -> Self {
        Self {
            timestamp,
            nonce,
            webhook_id,
            signature,
            body,
        }
    }

    /// Creates a request from `(name, value)` header pairs.
    ///
    /// Names are matched case-insensitively and unrelated headers are
    /// ignored. When a header repeats, the last value wins.
    #[must_use]
    pub fn from_headers<'a>(
        headers: impl IntoIterator<Item = (&'a str, &'a str)>,
        body: Vec<u8>,
    ) -> Self {
        let mut request = Self {
            body,
            ..Self::default()
        };
        for (name, value) in headers {
            let slot = match name.trim().to_ascii_lowercase().as_str() {
                HEADER_TIMESTAMP => &mut request.timestamp,
                HEADER_NONCE => &mut request.nonce,
                HEADER_WEBHOOK_ID => &mut request.webhook_id,
                HEADER_SIGNATURE => &mut request.signature,
                _ => continue,
            };
            *slot = Some(value.to_string());
        }
        request
    }

    /// Returns the timestamp header, if present.
    #[must_use]
    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }

    /// Returns the nonce header, if present.
    #[must_use]
    pub fn nonce(&self) -> Option<&str> {
        self.nonce.as_deref()
    }

    /// Returns the webhook id header, if present.
    #[must_use]
    pub fn webhook_id(&self) -> Option<&str> {
        self.webhook_id.as_deref()
    }
}

// ============================================================================
// VerifiedWebhook
// ============================================================================

/// A delivery whose signature has been verified.
#[derive(Clone, Debug)]
pub struct VerifiedWebhook {
    timestamp: String,
    nonce: String,
    webhook_id: String,
    body: Vec<u8>,
}

impl VerifiedWebhook {
    /// Returns the timestamp header.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Returns the nonce header.
    #[must_use]
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// Returns the webhook id header.
    #[must_use]
    pub fn webhook_id(&self) -> &str {
        &self.webhook_id
    }

    /// Returns the authenticated body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decodes the body into an [`Event`].
    ///
    /// # Errors
    ///
    /// Returns [`EventError`](crate::webhooks::EventError) if the body is not
    /// a valid envelope or its type is unknown.
    pub fn parse_event(&self) -> Result<Event, crate::webhooks::EventError> {
        Event::from_slice(&self.body)
    }
}

// ============================================================================
// Signature Functions
// ============================================================================

/// Computes the hex-encoded HMAC-SHA512 signature of a delivery.
///
/// # Example
///
/// ```rust
/// use moov_api::webhooks::compute_signature;
///
/// let signature = compute_signature("ts", "nonce", "hook", "secret");
/// assert_eq!(signature.len(), 128); // SHA512 produces 64 bytes = 128 hex chars
/// ```
#[must_use]
pub fn compute_signature(timestamp: &str, nonce: &str, webhook_id: &str, secret: &str) -> String {
    hex::encode(digest(timestamp, nonce, webhook_id, secret))
}

// HMAC accepts keys of any length, so construction cannot fail.
fn digest(timestamp: &str, nonce: &str, webhook_id: &str, secret: &str) -> Vec<u8> {
    let mut mac =
        HmacSha512::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(timestamp.as_bytes());
    mac.update(b"|");
    mac.update(nonce.as_bytes());
    mac.update(b"|");
    mac.update(webhook_id.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

/// Checks `signature` against the one computed from the other headers.
///
/// Returns `false` for an empty secret or a signature that is not valid hex.
/// The digest comparison is constant-time.
///
/// # Example
///
/// ```rust
/// use moov_api::webhooks::{compute_signature, verify_signature};
///
/// let signature = compute_signature("ts", "nonce", "hook", "secret");
/// assert!(verify_signature("ts", "nonce", "hook", &signature, "secret"));
/// assert!(!verify_signature("ts", "nonce", "hook", &signature, "other"));
/// ```
#[must_use]
pub fn verify_signature(
    timestamp: &str,
    nonce: &str,
    webhook_id: &str,
    signature: &str,
    secret: &str,
) -> bool {
    if secret.is_empty() {
        return false;
    }
    let Ok(delivered) = hex::decode(signature.trim()) else {
        return false;
    };
    let expected = digest(timestamp, nonce, webhook_id, secret);
    expected.ct_eq(&delivered).into()
}

// ============================================================================
// WebhookVerifier
// ============================================================================

/// Verifies webhook deliveries.
///
/// # Key Rotation
///
/// While a signing secret is being rotated, configure the old secret with
/// [`with_previous_secret`](Self::with_previous_secret). Deliveries are
/// checked against the current secret first, then the previous one.
#[derive(Clone, Debug)]
pub struct WebhookVerifier {
    secret: WebhookSecret,
    previous_secret: Option<WebhookSecret>,
}

// Verify WebhookVerifier is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WebhookVerifier>();
};

impl WebhookVerifier {
    /// Creates a verifier for one signing secret.
    #[must_use]
    pub const fn new(secret: WebhookSecret) -> Self {
        Self {
            secret,
            previous_secret: None,
        }
    }

    /// Also accepts signatures made with `secret`.
    #[must_use]
    pub fn with_previous_secret(mut self, secret: WebhookSecret) -> Self {
        self.previous_secret = Some(secret);
        self
    }

    /// Verifies `request`.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::MissingHeader`] if a signature header is
    /// absent or empty, and [`SignatureError::Mismatch`] if no configured
    /// secret produces the delivered signature.
    pub fn verify(&self, request: WebhookRequest) -> Result<VerifiedWebhook, SignatureError> {
        let result = self.check(request);
        if let Err(error) = &result {
            tracing::warn!("Rejected webhook delivery: {error}");
        }
        result
    }

    /// Verifies `request` and parses its body into an [`Event`].
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::Signature`] if verification fails (the body is
    /// not looked at) and [`WebhookError::Event`] if the body is not a valid
    /// event.
    pub fn verify_and_parse(&self, request: WebhookRequest) -> Result<Event, WebhookError> {
        Ok(self.verify(request)?.parse_event()?)
    }

    fn check(&self, request: WebhookRequest) -> Result<VerifiedWebhook, SignatureError> {
        let timestamp = required(request.timestamp, HEADER_TIMESTAMP)?;
        let nonce = required(request.nonce, HEADER_NONCE)?;
        let webhook_id = required(request.webhook_id, HEADER_WEBHOOK_ID)?;
        let signature = required(request.signature, HEADER_SIGNATURE)?;

        let matches = |secret: &WebhookSecret| {
            verify_signature(&timestamp, &nonce, &webhook_id, &signature, secret.as_ref())
        };
        if !matches(&self.secret) && !self.previous_secret.as_ref().is_some_and(matches) {
            return Err(SignatureError::Mismatch);
        }

        Ok(VerifiedWebhook {
            timestamp,
            nonce,
            webhook_id,
            body: request.body,
        })
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, SignatureError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(SignatureError::MissingHeader { name })
}

/// Verifies `request` with a single secret.
///
/// # Errors
///
/// Returns [`SignatureError::MissingSecret`] if `secret` is empty, otherwise
/// the errors of [`WebhookVerifier::verify`].
pub fn verify_webhook(
    secret: &str,
    request: WebhookRequest,
) -> Result<VerifiedWebhook, SignatureError> {
    let secret = WebhookSecret::new(secret).map_err(|_| SignatureError::MissingSecret)?;
    WebhookVerifier::new(secret).verify(request)
}
