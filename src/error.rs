//! Error types for the Moov API SDK.
//!
//! This module contains the configuration error type. Call, transport and
//! webhook errors live next to the layers that produce them
//! ([`crate::clients`] and [`crate::webhooks`]).
//!
//! # Example
//!
//! ```rust
//! use moov_api::{PublicKey, ConfigError};
//!
//! let result = PublicKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyPublicKey)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Public key cannot be empty.
    #[error("Public key cannot be empty. Please provide a valid Moov public key.")]
    EmptyPublicKey,

    /// Secret key cannot be empty.
    #[error("Secret key cannot be empty. Please provide a valid Moov secret key.")]
    EmptySecretKey,

    /// Webhook signing secret cannot be empty.
    #[error("Webhook secret cannot be empty. Please provide the signing secret for your webhook.")]
    EmptyWebhookSecret,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Host URL is invalid.
    #[error("Invalid API host '{url}'. Please provide a host name or a URL with scheme (e.g., 'https://api.moov.io').")]
    InvalidHost {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Rate limiter parameters are invalid.
    #[error("Invalid rate limit: {reason}")]
    InvalidRateLimit {
        /// The reason the limit is invalid.
        reason: String,
    },
}
