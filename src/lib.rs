//! # Moov API Rust SDK
//!
//! The core of a Rust SDK for the Moov payments API: the layer every
//! resource wrapper is built from, and the layer that consumes webhooks.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for API credentials and hosts
//! - Composable call construction via [`clients::call`] options
//! - An executor ([`Client`]) with Basic or Bearer authentication, caller-driven
//!   cancellation and an optional shared rate limiter
//! - Semantic status classification with a retryability signal
//! - Idempotency keys with distinguishable conflict errors
//! - Webhook signature verification and typed event dispatch via [`webhooks`]
//!
//! ## Quick Start
//!
//! ```rust
//! use moov_api::{ClientConfig, Credentials, PublicKey, SecretKey};
//!
//! // Create configuration using the builder pattern
//! let config = ClientConfig::builder()
//!     .credentials(Credentials::new(
//!         PublicKey::new("your-public-key").unwrap(),
//!         SecretKey::new("your-secret-key").unwrap(),
//!     ))
//!     .user_agent_prefix("my-platform/1.2")
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Making API Calls
//!
//! ```rust,ignore
//! use moov_api::clients::{call, CallContext, HttpMethod};
//! use moov_api::{CallError, CallStatus, Client};
//!
//! let client = Client::new(config)?;
//!
//! let result = client
//!     .execute(
//!         &CallContext::new(),
//!         [
//!             call::endpoint(HttpMethod::Post, "/accounts/%s/transfers", &[account_id]),
//!             call::accept_json(),
//!             call::idempotency(None),
//!             call::json_body(&transfer),
//!         ],
//!     )
//!     .await?
//!     .object_or_error::<Transfer>();
//!
//! match result {
//!     Ok(created) => println!("created {}", created.transfer_id),
//!     Err(CallError::IdempotencyConflict(e)) => println!("already submitted as {}", e.key),
//!     Err(e) if e.status() == Some(CallStatus::FailedValidation) => println!("fix input: {e}"),
//!     Err(e) if e.is_retryable() => println!("retry later: {e}"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! ## Consuming Webhooks
//!
//! ```rust,ignore
//! use moov_api::webhooks::{WebhookRequest, WebhookSecret, WebhookVerifier};
//!
//! let verifier = WebhookVerifier::new(WebhookSecret::new(signing_secret)?);
//! let event = verifier.verify_and_parse(WebhookRequest::from_headers(headers, body))?;
//!
//! if let Ok(transfer) = event.transfer_updated() {
//!     println!("{} -> {}", transfer.transfer_id, transfer.status);
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration and rate limiters are per client
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **No hidden retries**: Retryability is reported, never acted on
//! - **Fail closed**: Webhook bodies are unreadable until verified
//! - **Async-first**: Designed for use with the Tokio runtime

pub mod clients;
pub mod config;
pub mod error;
pub mod webhooks;

// Re-export public types at crate root for convenience
pub use config::{ApiHost, ClientConfig, ClientConfigBuilder, Credentials, PublicKey, SecretKey};
pub use error::ConfigError;

// Re-export call types
pub use clients::{
    CallContext, CallError, CallResponse, CallStatus, Client, HttpMethod, IdempotencyKey,
    RateLimiter,
};

// Re-export webhook types
pub use webhooks::{Event, EventPayload, EventType, WebhookError, WebhookVerifier};
