//! Call construction, execution and response classification.
//!
//! Every resource wrapper in the SDK is built from this layer:
//!
//! 1. Describe the call with [`call`] options, collected into a [`RequestSpec`]
//! 2. Execute it with [`Client::execute`], which authenticates the request and
//!    makes exactly one network call through an [`HttpTransport`]
//! 3. Classify and decode the [`CallResponse`] with one of the canonical
//!    helpers: [`CallResponse::object_or_error`],
//!    [`CallResponse::list_or_error`] or [`CallResponse::no_content_or_error`]
//!
//! # Overview
//!
//! - [`Client`]: The executor, generic over its [`HttpTransport`]
//! - [`CallContext`]: Caller-driven cancellation and deadlines
//! - [`CallStatus`]: Semantic status with a retryability signal
//! - [`IdempotencyKey`]: De-duplication token for mutating calls
//! - [`RateLimiter`]: Optional token bucket shared by one client's calls
//! - [`CallError`]: Unified error type
//!
//! # Example
//!
//! ```rust,ignore
//! use moov_api::clients::{call, CallContext, Client, HttpMethod};
//!
//! let transfer: Transfer = client
//!     .execute(
//!         &CallContext::new().with_timeout(Duration::from_secs(30)),
//!         [
//!             call::endpoint(HttpMethod::Post, "/accounts/%s/transfers", &[account_id]),
//!             call::accept_json(),
//!             call::idempotency(None),
//!             call::json_body(&request),
//!         ],
//!     )
//!     .await?
//!     .object_or_error()?;
//! ```
//!
//! # Retry Behavior
//!
//! Nothing in this module retries. [`CallError::is_retryable`] and
//! [`CallStatus::is_retryable`] are advisory; the embedding application
//! decides whether to retry and whether to reuse the idempotency key.

pub mod call;
mod client;
mod context;
mod errors;
mod idempotency;
mod multipart;
mod rate_limit;
mod response;
mod status;
mod transport;

pub use call::{CallOption, HttpMethod, RequestSpec, WaitFor, HEADER_WAIT_FOR};
pub use client::{Client, SDK_VERSION};
pub use context::CallContext;
pub use errors::{
    CallError, DecodeError, IdempotencyConflictError, InvalidCallError, SemanticCallError,
    TransportError,
};
pub use idempotency::{IdempotencyKey, HEADER_IDEMPOTENCY_KEY};
pub use multipart::MultipartPart;
pub use rate_limit::RateLimiter;
pub use response::{CallResponse, Decoded, HEADER_REQUEST_ID};
pub use status::CallStatus;
pub use transport::{HttpTransport, ReqwestTransport, TransportRequest, TransportResponse};
